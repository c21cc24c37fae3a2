use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::jwt::JwtKeys;
use crate::config::AppConfig;
use crate::domain::repositories::{
    LeagueRepository, MatchRepository, TeamRepository, UserRepository,
};
use crate::infrastructure::repositories::{
    InMemoryStore, PostgresLeagueRepository, PostgresMatchRepository, PostgresTeamRepository,
    PostgresUserRepository,
};
use crate::infrastructure::weather::WeatherService;
use crate::services::ScoreboardService;

/// Repository handles for one storage backend
#[derive(Clone)]
pub struct Repositories {
    pub leagues: Arc<dyn LeagueRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            leagues: Arc::new(PostgresLeagueRepository::new(pool.clone())),
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            matches: Arc::new(PostgresMatchRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
        }
    }

    pub fn in_memory(store: InMemoryStore) -> Self {
        Self {
            leagues: Arc::new(store.clone()),
            teams: Arc::new(store.clone()),
            matches: Arc::new(store.clone()),
            users: Arc::new(store),
        }
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub leagues: Arc<dyn LeagueRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub users: Arc<dyn UserRepository>,
    pub scoreboard: ScoreboardService,
    pub weather: Arc<dyn WeatherService>,
    pub jwt: Arc<JwtKeys>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(repositories: Repositories, weather: Arc<dyn WeatherService>, config: &AppConfig) -> Self {
        let scoreboard = ScoreboardService::new(
            repositories.teams.clone(),
            repositories.matches.clone(),
            config.points,
        );

        Self {
            leagues: repositories.leagues,
            teams: repositories.teams,
            matches: repositories.matches,
            users: repositories.users,
            scoreboard,
            weather,
            jwt: Arc::new(JwtKeys::new(&config.jwt_secret)),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
