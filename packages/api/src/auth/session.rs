//! Session state.
//!
//! The only thing ever written into a session is the user's id, under
//! [`SESSION_USER_ID_KEY`]. Credentials never enter it.

use tower_sessions::session::Error;
use tower_sessions::Session;
use todo_store::UserId;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Who, if anyone, the current request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(UserId),
}

impl SessionState {
    /// Read the state from a session. A stored id that does not parse counts as signed out.
    pub async fn load(session: &Session) -> Result<Self, Error> {
        let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
        Ok(Self::from_stored(user_id.as_deref()))
    }

    fn from_stored(user_id: Option<&str>) -> Self {
        match user_id.and_then(|id| id.parse().ok()) {
            Some(id) => Self::Authenticated(id),
            None => Self::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Authenticated(id) => Some(*id),
            Self::Unauthenticated => None,
        }
    }
}

/// Mark the session as belonging to `user_id`.
///
/// The session id is rotated first so an id handed out before sign-in cannot be
/// reused afterwards.
pub async fn establish(session: &Session, user_id: &UserId) -> Result<(), Error> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await
}

/// Drop all session data and expire the cookie.
pub async fn sign_out(session: &Session) -> Result<(), Error> {
    session.flush().await
}
