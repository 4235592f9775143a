//! Router configuration.
//!
//! This module sets up the axum router with all routes, the session layer,
//! and the tower-http middleware.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::time::Duration as CookieDuration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::handlers::{auth, health, tasks};
use crate::state::AppState;

/// Create the frontend router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /login`, `POST /login` - Sign in
/// - `GET /register`, `POST /register` - Registration
/// - `GET /logout` - Sign out
///
/// ## Session-bound
/// - `GET /` - Redirect to the task board
/// - `GET /tasks`, `POST /tasks` - List and create/update tasks
/// - `GET /tasks/edit/{id}` - Pre-fill the form for editing
/// - `GET /tasks/delete/{id}` - Delete a task
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(CookieDuration::minutes(
            state.config.session_inactivity_minutes,
        )));

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // Authentication
        .route("/", get(auth::root))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        // Task board
        .route("/tasks", get(tasks::list).post(tasks::save))
        .route("/tasks/edit/{id}", get(tasks::edit))
        .route("/tasks/delete/{id}", get(tasks::delete))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
