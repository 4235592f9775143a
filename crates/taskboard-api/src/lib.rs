//! Gateway client for the taskboard backend API.
//!
//! This crate owns every outbound call to the backend and is the sole place
//! where transport results are turned into classified outcomes:
//!
//! - [`ApiClient`] issues login, registration, and task/user CRUD calls
//! - [`ApiError`] is the failure taxonomy callers branch on
//! - [`ApiConfig`] fixes the backend base address and endpoint paths
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  Web frontend    │────▶│    ApiClient     │
//! │  (handlers)      │     │  (classification │
//! └──────────────────┘     │    boundary)     │
//!                          └────────┬─────────┘
//!                                   │ HTTPS + bearer
//!                          ┌────────▼─────────┐
//!                          │   Backend API    │
//!                          │ /auth /tarefas   │
//!                          │ /usuarios        │
//!                          └──────────────────┘
//! ```
//!
//! Raw `reqwest` errors never cross this crate's boundary; callers see only
//! [`ApiError::Unauthenticated`], [`ApiError::Validation`], or
//! [`ApiError::Transport`]. List operations additionally degrade to an empty
//! result instead of surfacing transport failures; see [`ApiClient`].
//!
//! # Example
//!
//! ```no_run
//! use taskboard_api::{ApiClient, ApiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ApiConfig {
//!     base_url: "http://localhost:8080".to_string(),
//! });
//!
//! let credential = client.login("ana", "secret").await?;
//! let tasks = client.list_tasks(&credential).await?;
//! println!("{} tasks", tasks.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, Result};

use taskboard_core::TaskId;

/// Configuration for the backend API connection.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g. `http://localhost:8080`). A trailing
    /// slash is tolerated.
    pub base_url: String,
}

impl ApiConfig {
    /// Get the login endpoint URL.
    #[must_use]
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base())
    }

    /// Get the registration endpoint URL.
    #[must_use]
    pub fn register_url(&self) -> String {
        format!("{}/auth/register", self.base())
    }

    /// Get the task collection URL.
    #[must_use]
    pub fn tasks_url(&self) -> String {
        format!("{}/tarefas", self.base())
    }

    /// Get the URL of a single task.
    #[must_use]
    pub fn task_url(&self, id: TaskId) -> String {
        format!("{}/tarefas/{id}", self.base())
    }

    /// Get the user collection URL.
    #[must_use]
    pub fn users_url(&self) -> String {
        format!("{}/usuarios", self.base())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = ApiConfig {
            base_url: "http://api.example.com".to_string(),
        };
        assert_eq!(config.login_url(), "http://api.example.com/auth/login");
        assert_eq!(config.tasks_url(), "http://api.example.com/tarefas");
        assert_eq!(
            config.task_url(TaskId::new(7)),
            "http://api.example.com/tarefas/7"
        );
        assert_eq!(config.users_url(), "http://api.example.com/usuarios");
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let config = ApiConfig {
            base_url: "http://api.example.com/".to_string(),
        };
        assert_eq!(config.register_url(), "http://api.example.com/auth/register");
    }
}
