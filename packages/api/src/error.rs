//! Error types for authentication and list operations.

use thiserror::Error;
use todo_store::{StoreError, UserId};

/// Why a register or sign-in attempt did not produce a session.
///
/// Every variant ends the same way for the client (back to the sign-in page);
/// the distinction only exists for logging.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("no username was given")]
    MissingUsername,

    #[error("no password was given")]
    MissingPassword,

    #[error("username is already registered")]
    UsernameTaken,

    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("credential store error: {0}")]
    Store(#[source] StoreError),
}

/// Failures of the list repository.
#[derive(Debug, Error)]
pub enum ListError {
    /// Loading the user document failed; nothing was changed.
    #[error("failed to load user: {0}")]
    StoreRead(#[source] StoreError),

    /// The session points at a user that no longer exists.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The mutation was computed but could not be persisted.
    #[error("failed to save user: {0}")]
    StoreWrite(#[source] StoreError),
}

impl ListError {
    /// Whether the client may simply submit the same request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ListError::StoreWrite(_))
    }
}
