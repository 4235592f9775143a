//! The failure taxonomy for gateway operations.

use thiserror::Error;

/// A result type using `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Classified failure of a backend call.
///
/// This is the only error callers of the gateway client see; raw transport
/// errors are converted before they leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend rejected the credential (missing, expired, or invalid),
    /// or rejected the login attempt itself. Observing this on an
    /// authenticated call means the session must be treated as dead.
    #[error("backend rejected the credential")]
    Unauthenticated,

    /// The backend rejected the request content (duplicate name, bad field,
    /// unknown id). The session credential is still good.
    #[error("backend rejected the request: {0}")]
    Validation(String),

    /// Network failure, malformed response, or an unexpected status.
    #[error("backend unreachable or misbehaving: {0}")]
    Transport(String),
}

impl ApiError {
    /// Whether this failure invalidates the owning session.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}
