//! Local username + password authentication and session state.

mod password;
mod service;
pub mod session;

pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use session::{SessionState, SESSION_USER_ID_KEY};
