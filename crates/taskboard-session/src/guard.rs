//! The invalidation guard around authenticated gateway calls.
//!
//! The session-safety rule (any `Unauthenticated` failure kills the session)
//! is easy to drop when each route handler checks outcomes by hand. This
//! module centralizes it: handlers hand over a closure that performs the
//! gateway call with the session's credential, and the guard performs the
//! state transition before the failure is returned.

use std::future::Future;

use tower_sessions::Session;

use taskboard_api::ApiError;
use taskboard_core::Credential;

use crate::error::AuthCallError;
use crate::state::{self, SessionState};

/// Run an authenticated gateway call with the session's credential.
///
/// Anonymous sessions short-circuit to [`AuthCallError::NotSignedIn`]
/// without touching the backend. When the call comes back with
/// [`ApiError::Unauthenticated`], the session is cleared first and the
/// caller sees [`AuthCallError::SessionExpired`]; every other failure
/// leaves the session intact.
///
/// # Errors
///
/// See [`AuthCallError`] for the full outcome taxonomy.
pub async fn with_credential<T, F, Fut>(session: &Session, call: F) -> Result<T, AuthCallError>
where
    F: FnOnce(Credential) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let user = match state::current(session).await? {
        SessionState::Anonymous => return Err(AuthCallError::NotSignedIn),
        SessionState::Authenticated(user) => user,
    };

    match call(user.credential).await {
        Ok(value) => Ok(value),
        Err(ApiError::Unauthenticated) => {
            tracing::info!("backend rejected the session credential; signing out");
            state::sign_out(session).await?;
            Err(AuthCallError::SessionExpired)
        }
        Err(other) => Err(AuthCallError::Gateway(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{sign_in, SessionUser};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn signed_in_session() -> Session {
        let session = fresh_session();
        sign_in(
            &session,
            SessionUser {
                credential: Credential::new("live-token"),
                display_name: "ana".to_string(),
            },
        )
        .await
        .unwrap();
        session
    }

    #[tokio::test]
    async fn anonymous_session_never_reaches_the_backend() {
        let session = fresh_session();
        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);

        let result = with_credential(&session, |_credential| async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<_, ApiError>(())
        })
        .await;

        assert!(matches!(result, Err(AuthCallError::NotSignedIn)));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn success_passes_through_and_keeps_the_session() {
        let session = signed_in_session().await;

        let value = with_credential(&session, |credential| async move {
            assert_eq!(credential.expose(), "live-token");
            Ok::<_, ApiError>(41 + 1)
        })
        .await
        .unwrap();

        assert_eq!(value, 42);
        let state = state::current(&session).await.unwrap();
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn unauthenticated_failure_clears_the_session() {
        let session = signed_in_session().await;

        let result = with_credential(&session, |_credential| async move {
            Err::<(), _>(ApiError::Unauthenticated)
        })
        .await;

        assert!(matches!(result, Err(AuthCallError::SessionExpired)));
        let state = state::current(&session).await.unwrap();
        assert_eq!(state, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn validation_failure_leaves_the_session_alone() {
        let session = signed_in_session().await;

        let result = with_credential(&session, |_credential| async move {
            Err::<(), _>(ApiError::Validation("bad title".to_string()))
        })
        .await;

        match result {
            Err(AuthCallError::Gateway(ApiError::Validation(detail))) => {
                assert_eq!(detail, "bad title");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let state = state::current(&session).await.unwrap();
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn transport_failure_leaves_the_session_alone() {
        let session = signed_in_session().await;

        let result = with_credential(&session, |_credential| async move {
            Err::<(), _>(ApiError::Transport("connection refused".to_string()))
        })
        .await;

        assert!(matches!(
            result,
            Err(AuthCallError::Gateway(ApiError::Transport(_)))
        ));
        let state = state::current(&session).await.unwrap();
        assert!(state.is_authenticated());
    }
}
