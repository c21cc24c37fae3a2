// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod errors;
pub mod league_repository;
pub mod match_repository;
pub mod team_repository;
pub mod user_repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use league_repository::LeagueRepository;
pub use match_repository::MatchRepository;
pub use team_repository::{LeagueFilter, TeamRepository};
pub use user_repository::{User, UserRepository};
