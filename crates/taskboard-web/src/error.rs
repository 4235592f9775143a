//! Request-level error type.
//!
//! Gateway failures are handled inline by the handlers (banner or forced
//! re-login); this type only covers infrastructure failures that leave a
//! request unservable.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use taskboard_session::SessionError;

/// Errors that abort a request with a 500.
#[derive(Debug, Error)]
pub enum WebError {
    /// The session store failed.
    #[error("session failure: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p>Please try again.</p>".to_string()),
        )
            .into_response()
    }
}
