use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::pagination::{LimitOffset, Paginated};
use crate::domain::team::{NewTeam, Team, TeamChanges};

/// Restricts a listing to the given leagues; empty means every league
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueFilter(pub Vec<i64>);

impl LeagueFilter {
    pub fn matches(&self, league_id: i64) -> bool {
        self.0.is_empty() || self.0.contains(&league_id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.0
    }
}

/// Repository trait for teams
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team; fails with `Conflict` when the name is taken
    async fn create(&self, team: &NewTeam) -> RepositoryResult<Team>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// List teams ordered by ID
    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Team>>;

    /// All teams of a league, ordered by ID
    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Team>>;

    /// Apply a partial update and return the stored team
    async fn update(&self, id: i64, changes: &TeamChanges) -> RepositoryResult<Team>;

    /// Delete a team, clearing it from the host and visitor slots of its matches
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
