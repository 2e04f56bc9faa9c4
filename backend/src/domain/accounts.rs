//! Account use-cases: signup and credential verification.

use std::sync::Arc;

use tracing::error;

use crate::domain::auth::{Credentials, PasswordDigest};
use crate::domain::error::Error;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::User;
use crate::domain::ApiResult;

fn storage_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user repository failure");
    Error::internal("user storage failed")
}

/// Application service implementing account operations.
#[derive(Clone)]
pub struct AccountService {
    repo: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Construct the service over a user repository.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new account.
    ///
    /// Usernames are unique; a collision surfaces as a conflict the caller
    /// can report back to the form.
    pub async fn signup(&self, credentials: &Credentials) -> ApiResult<User> {
        let user = User::new(
            credentials.username().clone(),
            PasswordDigest::new(credentials.password()),
        );
        match self.repo.insert(user.clone()).await {
            Ok(()) => Ok(user),
            Err(UserPersistenceError::DuplicateUsername { username }) => Err(Error::conflict(
                format!("username `{username}` is already taken"),
            )),
            Err(err) => Err(storage_error(err)),
        }
    }

    /// Verify credentials and return the matching user.
    ///
    /// Unknown usernames and wrong passwords produce the same error, so the
    /// response does not reveal which accounts exist.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let user = self
            .repo
            .find_by_username(credentials.username())
            .await
            .map_err(storage_error)?;
        match user {
            Some(user) if user.verify_password(credentials.password()) => Ok(user),
            _ => Err(Error::unauthorized("invalid username or password")),
        }
    }
}
