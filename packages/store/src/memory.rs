use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::{User, UserId};
use crate::repo::UserStore;

/// In-memory UserStore for tests and `memory://` deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    usernames: HashMap<String, UserId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".to_string()))
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        if inner.usernames.contains_key(username) {
            return Err(StoreError::UsernameTaken {
                username: username.to_string(),
            });
        }
        let user = User::new(username, password_hash);
        inner.usernames.insert(user.username.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .usernames
            .get(username)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn load(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        let stored = inner
            .users
            .get_mut(&user.id)
            .ok_or(StoreError::UserNotFound { user_id: user.id })?;
        if stored.version != user.version {
            return Err(StoreError::Conflict { user_id: user.id });
        }
        let mut saved = user.clone();
        saved.version += 1;
        *stored = saved.clone();
        Ok(saved)
    }
}
