//! Frontend configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the web frontend.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Listen address (e.g., "0.0.0.0:3000").
    #[serde(default = "WebConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Base URL of the backend API.
    #[serde(default = "WebConfig::default_api_base_url")]
    pub api_base_url: String,

    /// Mark the session cookie `Secure` (requires HTTPS all the way to the
    /// browser).
    #[serde(default)]
    pub secure_cookies: bool,

    /// Session inactivity expiry in minutes.
    #[serde(default = "WebConfig::default_session_inactivity_minutes")]
    pub session_inactivity_minutes: i64,

    /// Maximum request body size in bytes.
    #[serde(default = "WebConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "WebConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl WebConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:3000".to_string()
    }

    fn default_api_base_url() -> String {
        "http://localhost:8080".to_string()
    }

    const fn default_session_inactivity_minutes() -> i64 {
        30
    }

    const fn default_max_body() -> usize {
        64 * 1024 // forms only
    }

    const fn default_request_timeout() -> u64 {
        60
    }

    /// Build the configuration from environment variables, falling back to
    /// the defaults: `LISTEN_ADDR`, `API_BASE_URL`, `SECURE_COOKIES`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            secure_cookies: std::env::var("SECURE_COOKIES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.secure_cookies),
            session_inactivity_minutes: defaults.session_inactivity_minutes,
            max_body_bytes: defaults.max_body_bytes,
            request_timeout_seconds: defaults.request_timeout_seconds,
        }
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            api_base_url: Self::default_api_base_url(),
            secure_cookies: false,
            session_inactivity_minutes: Self::default_session_inactivity_minutes(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = WebConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert!(!config.secure_cookies);
        assert_eq!(config.session_inactivity_minutes, 30);
    }

    #[test]
    fn timeout_duration() {
        let config = WebConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }
}
