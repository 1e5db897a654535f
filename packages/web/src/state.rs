//! Application state for HTTP handlers.

use todo_api::{AuthService, ListRepository};
use todo_store::UserStore;

/// Services shared by all handlers, generic over the user store backend.
#[derive(Clone)]
pub struct AppState<S> {
    pub auth: AuthService<S>,
    pub lists: ListRepository<S>,
}

impl<S: UserStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            auth: AuthService::new(store.clone()),
            lists: ListRepository::new(store),
        }
    }
}
