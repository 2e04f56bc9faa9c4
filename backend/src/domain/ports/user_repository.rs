//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::user::{User, Username};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The store's username uniqueness constraint rejected the write.
    #[error("username `{username}` is already taken")]
    DuplicateUsername { username: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

/// Storage port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Usernames are unique across the store.
    async fn insert(&self, user: User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;
}
