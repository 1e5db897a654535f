//! Store error types.

use thiserror::Error;

use crate::models::UserId;

/// Errors returned by a [`crate::UserStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another user already registered this username.
    #[error("username already taken: {username}")]
    UsernameTaken { username: String },

    /// The document changed since it was loaded; the save was not applied.
    #[error("user {user_id} was modified concurrently")]
    Conflict { user_id: UserId },

    /// The saved document does not exist (anymore).
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: UserId },

    /// Backend connection or query failure.
    #[error("database error: {0}")]
    Database(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}
