//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use todo_api::SessionState;
use tower_sessions::Session;

use crate::error::AppError;

/// The session state of the current request.
///
/// Handlers match on the inner [`SessionState`] before doing anything else.
#[derive(Debug, Clone, Copy)]
pub struct Auth(pub SessionState);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        SessionState::load(&session)
            .await
            .map(Auth)
            .map_err(|err| AppError::from(err).into_response())
    }
}
