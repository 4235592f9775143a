//! Session state: the signed-in user payload and its transitions.
//!
//! The credential and display name live under one key as one value, so the
//! session is either fully authenticated or fully anonymous. There is no
//! state where one is present without the other.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use taskboard_core::Credential;

use crate::error::Result;

/// Key under which the signed-in user is stored in the session.
pub const SESSION_USER_KEY: &str = "auth.user";

/// The payload bound to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// The bearer credential obtained at login.
    pub credential: Credential,
    /// The username shown in the page header.
    pub display_name: String,
}

/// Authentication state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No signed-in user.
    Anonymous,
    /// A signed-in user with a live credential.
    Authenticated(SessionUser),
}

impl SessionState {
    /// The signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Read the current authentication state of the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current(session: &Session) -> Result<SessionState> {
    let user = session.get::<SessionUser>(SESSION_USER_KEY).await?;
    Ok(user.map_or(SessionState::Anonymous, SessionState::Authenticated))
}

/// Transition the session to `Authenticated`.
///
/// The session id is rotated so a pre-login cookie cannot be replayed into
/// an authenticated session. Credential and display name are written as one
/// value; a previous user, if any, is replaced wholesale.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn sign_in(session: &Session, user: SessionUser) -> Result<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, &user).await?;
    tracing::debug!(display_name = %user.display_name, "session signed in");
    Ok(())
}

/// Transition the session to `Anonymous`, wiping every field.
///
/// Used for explicit logout and for implicit invalidation when the backend
/// rejects the credential. The record is deleted from the store, not merely
/// marked.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn sign_out(session: &Session) -> Result<()> {
    session.flush().await?;
    tracing::debug!("session signed out");
    Ok(())
}
