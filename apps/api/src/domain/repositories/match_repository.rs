use async_trait::async_trait;

use super::{LeagueFilter, RepositoryResult};
use crate::domain::matches::{Match, MatchChanges, NewMatch};
use crate::domain::pagination::{LimitOffset, Paginated};

/// Repository trait for matches
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, fixture: &NewMatch) -> RepositoryResult<Match>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Match>>;

    /// List matches ordered by ID
    async fn list(
        &self,
        filter: &LeagueFilter,
        window: LimitOffset,
    ) -> RepositoryResult<Paginated<Match>>;

    /// All matches of a league, scored or not, ordered by ID
    async fn find_by_league(&self, league_id: i64) -> RepositoryResult<Vec<Match>>;

    async fn update(&self, id: i64, changes: &MatchChanges) -> RepositoryResult<Match>;

    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
