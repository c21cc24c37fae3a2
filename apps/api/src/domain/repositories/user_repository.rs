use async_trait::async_trait;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::user::value_objects::Username;

/// User data for persistence
///
/// Simple struct for user CRUD operations
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub password_hash: String,
}

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; fails with `Conflict` when the username is taken
    async fn create(&self, user: User) -> RepositoryResult<Uuid>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Find a user by username
    async fn find_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
}
