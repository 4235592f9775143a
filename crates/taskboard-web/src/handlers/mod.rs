//! Request handlers.
//!
//! Presentation glue only: each handler reads the session, invokes the
//! gateway client (through the session guard where a credential is
//! required), and turns the classified outcome into a page, a banner, or a
//! forced re-login.

pub mod auth;
pub mod health;
pub mod tasks;
