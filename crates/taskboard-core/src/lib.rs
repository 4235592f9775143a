//! Core types for the taskboard frontend.
//!
//! This crate provides the foundational types shared between the gateway
//! client, the session layer, and the web frontend:
//!
//! - **Identifiers**: Strongly-typed numeric IDs for tasks and users
//! - **Credential**: The opaque bearer token obtained at login
//! - **Records**: Wire-faithful task and user records exchanged with the
//!   backend API
//!
//! # Example
//!
//! ```
//! use taskboard_core::{Task, TaskId, UserRef, UserId};
//!
//! // A brand-new task has no id yet; the backend assigns one on create.
//! let task = Task {
//!     id: None,
//!     title: "write report".to_string(),
//!     description: String::new(),
//!     due_date: None,
//!     done: false,
//!     assignee: Some(UserRef::new(UserId::new(7))),
//! };
//! assert!(task.id.is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credential;
pub mod ids;
pub mod model;

pub use credential::Credential;
pub use ids::{IdError, TaskId, UserId};
pub use model::{Task, User, UserRef};
