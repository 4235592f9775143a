//! Error types for the session layer.

use thiserror::Error;

use taskboard_api::ApiError;

/// A result type using `SessionError`.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by the session store itself.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backing session store failed to load, save, or delete a record.
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

/// Outcome of an authenticated gateway call issued through the guard.
#[derive(Debug, Error)]
pub enum AuthCallError {
    /// The session holds no credential; the caller must send the user to
    /// login. No backend call was made.
    #[error("no signed-in user in the session")]
    NotSignedIn,

    /// The backend rejected the credential. The session has already been
    /// cleared; the caller must force a re-login.
    #[error("credential rejected by the backend; session cleared")]
    SessionExpired,

    /// A classified gateway failure that does not touch the session
    /// (validation or transport).
    #[error(transparent)]
    Gateway(ApiError),

    /// The session store failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthCallError {
    /// Whether the caller should redirect to the login page.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NotSignedIn | Self::SessionExpired)
    }
}
