//! Mapping of service errors onto HTTP responses.

use axum::extract::rejection::FormRejection;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use todo_api::{AuthFailure, ListError};

use crate::routes::SIGN_IN_PATH;

/// Error returned by route handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    #[error(transparent)]
    List(#[from] ListError),

    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Auth(AuthFailure::Session(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(err) => {
                tracing::warn!(error = %err, "authentication failed");
                Redirect::to(SIGN_IN_PATH).into_response()
            }
            AppError::List(err) if err.is_retryable() => {
                tracing::error!(error = %err, "list change was not saved");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    [(header::RETRY_AFTER, "1")],
                    "Your change could not be saved. Please try again.",
                )
                    .into_response()
            }
            AppError::List(err) => {
                tracing::error!(error = %err, "failed to load user");
                Redirect::to(SIGN_IN_PATH).into_response()
            }
            AppError::Form(rejection) => {
                tracing::debug!(error = %rejection, "rejected form body");
                rejection.into_response()
            }
        }
    }
}
