//! # Web crate — HTTP server for the todo app
//!
//! Wires the [`todo_api`] services into an axum [`Router`]:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`routes`] | One handler per endpoint (`/auth`, `/list`, `/list/{name}`, `/signup`, `/signin`, `/logout`, `/delete`) |
//! | [`extract`] | `Auth` extractor turning the session into a `SessionState` |
//! | [`error`] | `AppError` and its mapping onto redirects and `503` responses |
//! | [`views`] | Server-side rendered pages (Dioxus `rsx!` + `dioxus-ssr`) |
//! | [`settings`] | Process configuration from `config.toml` and the environment |
//!
//! [`create_app`] adds the session and request tracing layers on top of the routes.

use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use todo_store::UserStore;

pub mod error;
pub mod extract;
pub mod routes;
pub mod settings;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use settings::{SessionOptions, Settings};
pub use state::AppState;

/// Build the complete application: routes, signed-cookie sessions and request logging.
pub fn create_app<S, Store>(state: AppState<S>, session_store: Store, options: SessionOptions) -> Router
where
    S: UserStore,
    Store: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(options.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(options.inactivity))
        .with_signed(options.key);

    create_router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
