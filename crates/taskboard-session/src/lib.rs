//! Session-bound credential lifecycle.
//!
//! This crate binds the backend credential to the browser session and owns
//! the state machine between `Anonymous` and `Authenticated`:
//!
//! - [`state`]: the `SessionUser` payload stored under a single session key,
//!   sign-in and sign-out transitions
//! - [`guard`]: the wrapper that runs an authenticated gateway call and
//!   clears the session the moment the backend rejects the credential
//!
//! The session transport (cookie issuance, id generation, the backing
//! key-value store) is `tower-sessions`; everything here operates on an
//! injected [`Session`](tower_sessions::Session), so tests run against the
//! in-memory store.
//!
//! # Invariants
//!
//! - Credential and display name are one value: they are written together at
//!   sign-in and wiped together at sign-out. There is no partial update.
//! - Any authenticated gateway call observing an `Unauthenticated` failure
//!   transitions the session to anonymous before the failure reaches the
//!   caller. Route handlers cannot forget the transition because
//!   [`guard::with_credential`] performs it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod guard;
pub mod state;

pub use error::{AuthCallError, Result, SessionError};
pub use guard::with_credential;
pub use state::{SessionState, SessionUser};
