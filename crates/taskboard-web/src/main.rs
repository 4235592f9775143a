//! Taskboard web frontend - server entry point.
//!
//! Reads its configuration from the environment (`LISTEN_ADDR`,
//! `API_BASE_URL`, `SECURE_COOKIES`), builds the gateway client and the
//! router, and serves.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskboard_api::{ApiClient, ApiConfig};
use taskboard_web::{create_router, AppState, WebConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,taskboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting taskboard web frontend");

    let config = WebConfig::from_env();
    tracing::info!(
        listen_addr = %config.listen_addr,
        api_base_url = %config.api_base_url,
        secure_cookies = config.secure_cookies,
        "Configuration loaded"
    );

    let api = ApiClient::new(ApiConfig {
        base_url: config.api_base_url.clone(),
    });

    let state = Arc::new(AppState::new(api, config.clone()));
    let app = create_router(state);
    tracing::info!("Router configured");

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(listen_addr = %config.listen_addr, "Serving HTTP");
    axum::serve(listener, app).await?;

    Ok(())
}
