//! Server-rendered web frontend for the taskboard backend API.
//!
//! This crate wires the gateway client and the session layer into an axum
//! application: login and registration forms, the task board page, and the
//! CRUD routes behind it. It renders HTML on the server and holds no state
//! of its own beyond the session store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Browser                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ session cookie
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      taskboard-web                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │  Session    │ │   Router    │ │    HTML views       │    │
//! │  │  layer      │ │  + handlers │ │    + flash          │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ bearer credential
//!                              ▼
//!                       ┌──────────────┐
//!                       │  Backend API │
//!                       └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskboard_api::{ApiClient, ApiConfig};
//! use taskboard_web::{create_router, AppState, WebConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WebConfig::default();
//! let api = ApiClient::new(ApiConfig {
//!     base_url: config.api_base_url.clone(),
//! });
//! let app = create_router(Arc::new(AppState::new(api, config.clone())));
//!
//! let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use config::WebConfig;
pub use error::WebError;
pub use routes::create_router;
pub use state::AppState;
