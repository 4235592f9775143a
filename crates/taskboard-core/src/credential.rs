//! The opaque bearer credential issued by the backend at login.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token obtained once per login and attached verbatim to every
/// authenticated backend call.
///
/// The token is opaque: nothing in this system inspects its structure or
/// expiry. It lives only inside the owning session's record and is dropped
/// with it. `Debug` is redacted and `Display` is deliberately absent so the
/// raw token cannot end up in log output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Return the raw token, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<redacted>)")
    }
}
