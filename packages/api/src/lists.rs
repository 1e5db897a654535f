//! # List repository — per-user lists and items
//!
//! Every operation works on the signed-in user's document: load it, change the
//! embedded lists in memory, save it back. Saves go through the version check of
//! [`UserStore::save`], so a request that read a stale copy fails with
//! [`ListError::StoreWrite`] instead of overwriting a concurrent change.
//!
//! ## Naming
//!
//! The unnamed list is called [`DEFAULT_LIST_NAME`] and lives at `/list`. Named
//! lists take the [`capitalize`]d form of the name the client asked for, and live
//! at `/list/<name>` (see [`list_path`]).
//!
//! ## Seeding
//!
//! A list that does not exist yet is created on first visit with the
//! [`SEED_ITEM_NAMES`], each item getting a fresh id on every creation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use todo_store::{Item, ItemId, TodoList, User, UserId, UserStore};

use crate::error::ListError;

/// Name of the list shown at `/list`.
pub const DEFAULT_LIST_NAME: &str = "Today";

/// Items every new list starts with.
pub const SEED_ITEM_NAMES: [&str; 3] = [
    "Welcome to your todolist!",
    "Hit the + button to add a new item.",
    "<-- Hit this to delete an item.",
];

/// Characters escaped when a list name becomes a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fresh seed items, with ids generated now.
pub fn seed_items() -> Vec<Item> {
    SEED_ITEM_NAMES.iter().map(|name| Item::new(*name)).collect()
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Route that displays the list called `name`.
pub fn list_path(name: &str) -> String {
    if name == DEFAULT_LIST_NAME {
        "/list".to_string()
    } else {
        format!("/list/{}", utf8_percent_encode(name, PATH_SEGMENT))
    }
}

/// Outcome of [`ListRepository::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListLookup {
    /// The list exists; render it.
    Found(TodoList),
    /// The list was just created and saved; fetch it again.
    Created,
}

/// Reads and mutates the lists embedded in a user document.
#[derive(Clone, Debug)]
pub struct ListRepository<S> {
    store: S,
}

impl<S: UserStore> ListRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load_user(&self, user_id: &UserId) -> Result<User, ListError> {
        self.store
            .load(user_id)
            .await
            .map_err(ListError::StoreRead)?
            .ok_or(ListError::UserNotFound(*user_id))
    }

    async fn persist(&self, user: &User) -> Result<User, ListError> {
        self.store.save(user).await.map_err(ListError::StoreWrite)
    }

    /// Return the list called `name`, creating it with the seed items if it is missing.
    pub async fn get_or_create(&self, user_id: &UserId, name: &str) -> Result<ListLookup, ListError> {
        let mut user = self.load_user(user_id).await?;
        if let Some(list) = user.list(name) {
            return Ok(ListLookup::Found(list.clone()));
        }

        user.lists.push(TodoList::new(name, seed_items()));
        self.persist(&user).await?;
        tracing::info!(%user_id, list = name, "created list");
        Ok(ListLookup::Created)
    }

    /// Append an item to `list_name`. An unknown list is left alone, but the
    /// document is still saved.
    pub async fn add_item(
        &self,
        user_id: &UserId,
        list_name: &str,
        item_name: &str,
    ) -> Result<(), ListError> {
        let mut user = self.load_user(user_id).await?;
        match user.list_mut(list_name) {
            Some(list) => list.items.push(Item::new(item_name)),
            None => tracing::debug!(%user_id, list = list_name, "add to unknown list ignored"),
        }
        self.persist(&user).await?;
        Ok(())
    }

    /// Remove the item with `item_id` from `list_name`. Unknown lists and ids are
    /// left alone, but the document is still saved.
    pub async fn remove_item(
        &self,
        user_id: &UserId,
        list_name: &str,
        item_id: &ItemId,
    ) -> Result<(), ListError> {
        let mut user = self.load_user(user_id).await?;
        if let Some(list) = user.list_mut(list_name) {
            let removed = list.remove_item(item_id);
            tracing::debug!(%user_id, list = list_name, removed, "removed items");
        }
        self.persist(&user).await?;
        Ok(())
    }
}
