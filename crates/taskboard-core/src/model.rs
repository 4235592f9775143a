//! Task and user records exchanged with the backend API.
//!
//! Field names on the wire follow the backend's JSON contract (`titulo`,
//! `nome`, ...); the Rust field names stay English. The gateway transfers
//! these records opaquely; the only field it ever branches on is `id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{TaskId, UserId};

/// A task record.
///
/// `id` is `None` for a task that has not been created yet; the backend
/// assigns the id on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned id; absent on a record headed for creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    /// Short task title.
    #[serde(rename = "titulo")]
    pub title: String,
    /// Free-form description.
    #[serde(rename = "descricao", default)]
    pub description: String,
    /// Due date, ISO `YYYY-MM-DD` on the wire.
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Completion flag.
    #[serde(rename = "status", default)]
    pub done: bool,
    /// Assigned user. Outbound, only the identifier is forwarded.
    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
}

/// Reference to a user embedded in a task.
///
/// The backend returns the full user object here, but on the outbound path
/// only the identifier is serialized; the embedded graph never travels
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The referenced user's id.
    pub id: UserId,
    /// Display name, populated on records coming from the backend. Never
    /// serialized.
    #[serde(rename = "nome", default, skip_serializing)]
    pub name: Option<String>,
}

impl UserRef {
    /// Build an identifier-only reference, as sent to the backend.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self { id, name: None }
    }
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned id; absent on a record headed for registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Birth date, ISO `YYYY-MM-DD` on the wire.
    #[serde(
        rename = "dataNascimento",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_date: Option<NaiveDate>,
    /// Whether the account is active.
    #[serde(rename = "ativo", default)]
    pub active: bool,
}
