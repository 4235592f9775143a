//! Shared application state.

use taskboard_api::ApiClient;

use crate::config::WebConfig;

/// State available to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The gateway client for the backend API.
    pub api: ApiClient,
    /// Frontend configuration.
    pub config: WebConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(api: ApiClient, config: WebConfig) -> Self {
        Self { api, config }
    }
}
