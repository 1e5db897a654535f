//! # Document models for users, lists and items
//!
//! A [`User`] is a single document that embeds everything the user owns: the
//! ordered sequence of [`TodoList`]s, and inside each list the ordered sequence of
//! [`Item`]s. Lists are never shared between users and items never move between
//! lists, so the whole tree is read and written as one unit through
//! [`crate::UserStore`].
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserId`] | Server-generated identifier of a user (UUID v4). This is the only value kept in a session. |
//! | [`ItemId`] | Deletion key of an item: the string form of a time-ordered UUID v7, generated when the item is created. |
//! | [`Item`] | A checklist entry: display name plus id. |
//! | [`TodoList`] | A named list. Names are unique within one user. |
//! | [`User`] | Credential (username + Argon2 PHC hash), the embedded lists, and a `version` used for optimistic concurrency on save. |
//!
//! Lookups by list name and by item id are linear scans over the embedded vectors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a user document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Deletion key of an item.
///
/// Kept as a string so that whatever token a client posts back can be compared
/// directly, without a parse step that could fail.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh time-ordered id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single checklist entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub id: ItemId,
}

impl Item {
    /// Create an item with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: ItemId::generate(),
        }
    }
}

/// A named list of items owned by one user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl TodoList {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Remove every item whose id equals `id`. Returns how many were removed.
    pub fn remove_item(&mut self, id: &ItemId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        before - self.items.len()
    }
}

/// A user document with its embedded lists.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    #[serde(default)]
    pub lists: Vec<TodoList>,
    /// Bumped by the store on every successful save.
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A new user with no lists, not yet persisted.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            lists: Vec::new(),
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Find a list by exact name.
    pub fn list(&self, name: &str) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.name == name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.name == name)
    }
}

// Hand-written so the password hash never ends up in logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("lists", &self.lists)
            .field("version", &self.version)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
