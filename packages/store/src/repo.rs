//! # `UserStore` — persistence of user documents
//!
//! The single seam between the application and its database. Everything a user
//! owns lives inside one [`User`] document, so the trait only needs whole-document
//! operations: create on registration, look up by id or username, and save after
//! a mutation.
//!
//! ## Optimistic concurrency
//!
//! Handlers follow a load → mutate in memory → save sequence with no lock held in
//! between. To keep two interleaved sequences for the same user from silently
//! discarding each other's changes, [`UserStore::save`] only writes when the
//! stored `version` still equals the version the caller loaded, and fails with
//! [`StoreError::Conflict`] otherwise. The returned document carries the bumped
//! version.
//!
//! Implementations: [`crate::MemoryStore`] and, behind the `postgres` feature,
//! `PgStore`.

use std::future::Future;

use crate::error::StoreError;
use crate::models::{User, UserId};

/// Async storage for [`User`] documents.
pub trait UserStore: Clone + Send + Sync + 'static {
    /// Insert a new user. Fails with [`StoreError::UsernameTaken`] on a duplicate username.
    fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    fn load(&self, id: &UserId) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;

    /// Replace the stored document if its version still matches `user.version`.
    fn save(&self, user: &User) -> impl Future<Output = Result<User, StoreError>> + Send;
}
