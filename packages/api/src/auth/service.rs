//! Registration and credential checks against the user store.

use todo_store::{StoreError, UserId, UserStore};

use super::password::{hash_password, verify_password};
use crate::error::AuthFailure;

/// Creates users and verifies their credentials.
///
/// Establishing the session is left to the caller (see [`super::session::establish`]),
/// which keeps this type free of any HTTP concerns.
#[derive(Clone, Debug)]
pub struct AuthService<S> {
    store: S,
}

impl<S: UserStore> AuthService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new user and return its id.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId, AuthFailure> {
        check_present(username, password)?;

        let password_hash = hash_password(password)?;
        let user = self
            .store
            .create_user(username, &password_hash)
            .await
            .map_err(|e| match e {
                StoreError::UsernameTaken { .. } => AuthFailure::UsernameTaken,
                other => AuthFailure::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "registered user");
        Ok(user.id)
    }

    /// Check a username/password pair and return the matching user's id.
    ///
    /// An unknown username and a wrong password fail identically.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserId, AuthFailure> {
        check_present(username, password)?;

        let Some(user) = self
            .store
            .find_by_username(username)
            .await
            .map_err(AuthFailure::Store)?
        else {
            return Err(AuthFailure::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthFailure::InvalidCredentials);
        }

        Ok(user.id)
    }
}

fn check_present(username: &str, password: &str) -> Result<(), AuthFailure> {
    if username.is_empty() {
        return Err(AuthFailure::MissingUsername);
    }
    if password.is_empty() {
        return Err(AuthFailure::MissingPassword);
    }
    Ok(())
}
