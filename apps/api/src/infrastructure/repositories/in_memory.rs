use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::league::{League, LeagueChanges, NewLeague};
use crate::domain::matches::{Match, MatchChanges, NewMatch};
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::repositories::{
    LeagueFilter, LeagueRepository, MatchRepository, RepositoryError, RepositoryResult,
    TeamRepository, User, UserRepository,
};
use crate::domain::team::{NewTeam, Team, TeamChanges};
use crate::domain::user::value_objects::Username;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    leagues: BTreeMap<i64, League>,
    teams: BTreeMap<i64, Team>,
    matches: BTreeMap<i64, Match>,
    league_seq: i64,
    team_seq: i64,
    match_seq: i64,
}

impl Tables {
    fn league_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.leagues
            .values()
            .any(|league| league.name == name && Some(league.id) != except)
    }

    fn team_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.teams
            .values()
            .any(|team| team.name == name && Some(team.id) != except)
    }
}

/// Process-local store implementing every repository trait
///
/// All tables sit behind one lock so cascades and reference clearing happen
/// atomically. Ids are assigned per table starting at 1, like a serial column.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeagueRepository for InMemoryStore {
    async fn create(&self, league: &NewLeague) -> RepositoryResult<League> {
        let mut tables = self.tables.write().await;
        if tables.league_name_taken(league.name(), None) {
            return Err(RepositoryError::Conflict(format!(
                "league with name {} already exists",
                league.name()
            )));
        }

        tables.league_seq += 1;
        let created = League {
            id: tables.league_seq,
            name: league.name().to_string(),
            owner_id: league.owner_id(),
        };
        tables.leagues.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<League>> {
        Ok(self.tables.read().await.leagues.get(&id).cloned())
    }

    async fn list(&self, window: LimitOffset) -> RepositoryResult<Paginated<League>> {
        let tables = self.tables.read().await;
        let all = tables.leagues.values().cloned().collect();
        Ok(Paginated::from_ordered(all, window))
    }

    async fn update(&self, id: i64, changes: &LeagueChanges) -> RepositoryResult<League> {
        let mut tables = self.tables.write().await;
        if let Some(name) = changes.name() {
            if tables.league_name_taken(name, Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "league with name {} already exists",
                    name
                )));
            }
        }

        let league = tables
            .leagues
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("league", id))?;
        league.apply(changes);
        Ok(league.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if tables.leagues.remove(&id).is_none() {
            return Err(RepositoryError::not_found("league", id));
        }
        tables.teams.retain(|_, team| team.league_id != id);
        tables.matches.retain(|_, fixture| fixture.league_id != id);
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn create(&self, team: &NewTeam) -> RepositoryResult<Team> {
        let mut tables = self.tables.write().await;
        if !tables.leagues.contains_key(&team.league_id()) {
            return Err(RepositoryError::not_found("league", team.league_id()));
        }
        if tables.team_name_taken(team.name(), None) {
            return Err(RepositoryError::Conflict(format!(
                "team with name {} already exists",
                team.name()
            )));
        }

        tables.team_seq += 1;
        let created = Team {
            id: tables.team_seq,
            league_id: team.league_id(),
            name: team.name().to_string(),
            city: team.city().to_string(),
        };
        tables.teams.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        Ok(self.tables.read().await.teams.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Team>> {
        let tables = self.tables.read().await;
        let all = tables
            .teams
            .values()
            .filter(|team| filter.matches(team.league_id))
            .cloned()
            .collect();
        Ok(Paginated::from_ordered(all, window))
    }

    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Team>> {
        let tables = self.tables.read().await;
        Ok(tables
            .teams
            .values()
            .filter(|team| team.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, changes: &TeamChanges) -> RepositoryResult<Team> {
        let mut tables = self.tables.write().await;
        if let Some(name) = changes.name() {
            if tables.team_name_taken(name, Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "team with name {} already exists",
                    name
                )));
            }
        }

        let team = tables
            .teams
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("team", id))?;
        team.apply(changes);
        Ok(team.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        if tables.teams.remove(&id).is_none() {
            return Err(RepositoryError::not_found("team", id));
        }

        for fixture in tables.matches.values_mut() {
            if fixture.host_id == Some(id) {
                fixture.host_id = None;
            }
            if fixture.visitor_id == Some(id) {
                fixture.visitor_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn create(&self, fixture: &NewMatch) -> RepositoryResult<Match> {
        let mut tables = self.tables.write().await;
        if !tables.leagues.contains_key(&fixture.league_id) {
            return Err(RepositoryError::not_found("league", fixture.league_id));
        }
        for team_id in [fixture.host_id, fixture.visitor_id].into_iter().flatten() {
            if !tables.teams.contains_key(&team_id) {
                return Err(RepositoryError::not_found("team", team_id));
            }
        }

        tables.match_seq += 1;
        let created = Match {
            id: tables.match_seq,
            league_id: fixture.league_id,
            host_id: fixture.host_id,
            visitor_id: fixture.visitor_id,
            host_score: fixture.host_score,
            visitor_score: fixture.visitor_score,
            address: fixture.address.clone(),
            datetime: fixture.datetime,
        };
        tables.matches.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Match>> {
        Ok(self.tables.read().await.matches.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Match>> {
        let tables = self.tables.read().await;
        let all = tables
            .matches
            .values()
            .filter(|fixture| filter.matches(fixture.league_id))
            .cloned()
            .collect();
        Ok(Paginated::from_ordered(all, window))
    }

    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Match>> {
        let tables = self.tables.read().await;
        Ok(tables
            .matches
            .values()
            .filter(|fixture| fixture.league_id == league_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, changes: &MatchChanges) -> RepositoryResult<Match> {
        let mut tables = self.tables.write().await;
        for (_, team_id) in changes.assigned_teams() {
            if !tables.teams.contains_key(&team_id) {
                return Err(RepositoryError::not_found("team", team_id));
            }
        }

        let fixture = tables
            .matches
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("match", id))?;
        fixture
            .apply(changes)
            .map_err(|e| RepositoryError::Conflict(e.to_string()))?;
        Ok(fixture.clone())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .matches
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("match", id))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> RepositoryResult<Uuid> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(RepositoryError::Conflict(format!(
                "user with username {} already exists",
                user.username
            )));
        }

        let id = user.id;
        tables.users.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }
}
