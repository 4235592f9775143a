//! One-shot flash messages carried across redirects via the session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::WebError;

/// Key under which the pending flash is stored in the session.
const FLASH_KEY: &str = "flash";

/// A banner shown once on the next rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Success banner text.
    pub message: Option<String>,
    /// Error banner text.
    pub error: Option<String>,
}

impl Flash {
    /// A success flash.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            error: None,
        }
    }

    /// An error flash.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(text.into()),
        }
    }
}

/// Store a flash for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set(session: &Session, flash: Flash) -> Result<(), WebError> {
    session
        .insert(FLASH_KEY, &flash)
        .await
        .map_err(taskboard_session::SessionError::from)?;
    Ok(())
}

/// Take the pending flash, leaving none behind.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take(session: &Session) -> Result<Flash, WebError> {
    let flash = session
        .remove::<Flash>(FLASH_KEY)
        .await
        .map_err(taskboard_session::SessionError::from)?;
    Ok(flash.unwrap_or_default())
}
