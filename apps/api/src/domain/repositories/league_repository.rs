use async_trait::async_trait;

use super::RepositoryResult;
use crate::domain::league::{League, LeagueChanges, NewLeague};
use crate::domain::pagination::{LimitOffset, Paginated};

/// Repository trait for leagues
#[async_trait]
pub trait LeagueRepository: Send + Sync {
    /// Insert a league; fails with `Conflict` when the name is taken
    async fn create(&self, league: &NewLeague) -> RepositoryResult<League>;

    /// Find a league by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<League>>;

    /// List leagues ordered by ID
    async fn list(&self, window: LimitOffset) -> RepositoryResult<Paginated<League>>;

    /// Apply a partial update and return the stored league
    async fn update(&self, id: i64, changes: &LeagueChanges) -> RepositoryResult<League>;

    /// Delete a league together with its teams and matches
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
