// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_league_repository;
pub mod postgres_match_repository;
pub mod postgres_team_repository;
pub mod postgres_user_repository;

pub use in_memory::InMemoryStore;
pub use postgres_league_repository::PostgresLeagueRepository;
pub use postgres_match_repository::PostgresMatchRepository;
pub use postgres_team_repository::PostgresTeamRepository;
pub use postgres_user_repository::PostgresUserRepository;

use crate::domain::repositories::RepositoryError;

/// Maps a unique or check constraint violation to `Conflict`, anything else
/// to `Database`
pub(crate) fn conflict_or_database(err: sqlx::Error, conflict: impl FnOnce() -> String) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            RepositoryError::Conflict(conflict())
        }
        _ => RepositoryError::Database(err),
    }
}
