//! Login, registration, and logout.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use taskboard_api::ApiError;
use taskboard_core::User;
use taskboard_session::{guard, state as session_state, AuthCallError, SessionUser};

use crate::error::WebError;
use crate::flash::{self, Flash};
use crate::state::AppState;
use crate::views;

/// Root: hand the browser to the task board (which bounces anonymous
/// visitors to the login page).
pub async fn root() -> Redirect {
    Redirect::to("/tasks")
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Set when an expired session forced the redirect here.
    #[serde(default)]
    pub expired: bool,
}

/// Render the login form.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn login_page(
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<Response, WebError> {
    let mut flash = flash::take(&session).await?;
    if query.expired && flash.error.is_none() {
        flash.error = Some("Your session has expired. Please sign in again.".to_string());
    }
    Ok(views::login_page(&flash).into_response())
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Authenticate against the backend and bind the credential to the session.
///
/// A rejected login re-renders the form with one unspecific message: wrong
/// password and unknown user look identical, and nothing is stored.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match state.api.login(&form.username, &form.password).await {
        Ok(credential) => {
            session_state::sign_in(
                &session,
                SessionUser {
                    credential,
                    display_name: form.username,
                },
            )
            .await?;
            Ok(Redirect::to("/tasks").into_response())
        }
        Err(ApiError::Unauthenticated) => {
            Ok(views::login_page(&Flash::error("Invalid username or password.")).into_response())
        }
        Err(error) => {
            tracing::warn!(%error, "login attempt could not reach the backend");
            Ok(views::login_page(&Flash::error(
                "Sign-in is unavailable right now. Please try again.",
            ))
            .into_response())
        }
    }
}

/// Render the registration form.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn register_page(session: Session) -> Result<Response, WebError> {
    let flash = flash::take(&session).await?;
    Ok(views::register_page(&flash).into_response())
}

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Display name of the new user.
    pub name: String,
    /// Optional birth date, `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: String,
    /// Checkbox: present when the account starts active.
    #[serde(default)]
    pub active: Option<String>,
}

/// Forward a registration to the backend.
///
/// Credential-agnostic: a signed-in session lends its credential (the
/// backend may require an admin), an anonymous one registers bare. Which of
/// the two the backend accepts is its policy, not ours.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    let birth_date = match parse_optional_date(&form.birth_date) {
        Ok(date) => date,
        Err(()) => {
            return Ok(
                views::register_page(&Flash::error("The birth date must be YYYY-MM-DD."))
                    .into_response(),
            );
        }
    };
    let record = User {
        id: None,
        name: form.name,
        birth_date,
        active: form.active.is_some(),
    };

    let result = if session_state::current(&session).await?.is_authenticated() {
        guard::with_credential(&session, |credential| {
            let api = state.api.clone();
            let record = record.clone();
            async move { api.register(&record, Some(&credential)).await }
        })
        .await
    } else {
        state
            .api
            .register(&record, None)
            .await
            .map_err(AuthCallError::Gateway)
    };

    match result {
        Ok(()) => {
            flash::set(
                &session,
                Flash::message("User registered. Sign in to continue."),
            )
            .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(AuthCallError::NotSignedIn | AuthCallError::SessionExpired) => {
            Ok(Redirect::to("/login?expired=true").into_response())
        }
        Err(AuthCallError::Gateway(error)) => Ok(views::register_page(&Flash::error(format!(
            "Could not register: {error}"
        )))
        .into_response()),
        Err(AuthCallError::Session(error)) => Err(error.into()),
    }
}

/// Clear the session and return to the login page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    session_state::sign_out(&session).await?;
    Ok(Redirect::to("/login"))
}

fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}
