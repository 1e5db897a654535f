//! # API crate — authentication and list operations for the todo app
//!
//! Everything the route handlers need that is not HTTP itself:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Username + password registration and sign-in, Argon2 hashing, session state |
//! | [`lists`] | Per-user list repository: get-or-create with seed items, add item, remove item, list naming and routes |
//! | [`error`] | `AuthFailure` and `ListError` |
//!
//! Both services are generic over a [`todo_store::UserStore`], so tests run
//! against the in-memory store and the server against PostgreSQL.

pub mod auth;
pub mod error;
pub mod lists;

pub use auth::{AuthService, SessionState};
pub use error::{AuthFailure, ListError};
pub use lists::{ListLookup, ListRepository, DEFAULT_LIST_NAME};
