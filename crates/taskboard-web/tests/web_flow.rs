//! End-to-end flows through the router, against a mock backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskboard_api::{ApiClient, ApiConfig};
use taskboard_web::{create_router, AppState, WebConfig};

fn app_for(server: &MockServer) -> Router {
    let config = WebConfig {
        api_base_url: server.uri(),
        ..WebConfig::default()
    };
    let api = ApiClient::new(ApiConfig {
        base_url: server.uri(),
    });
    create_router(Arc::new(AppState::new(api, config)))
}

async fn mock_login_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jwt": "token-abc"
        })))
        .mount(server)
        .await;
}

async fn mock_empty_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tarefas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

/// POST the login form and return the session cookie.
async fn sign_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ana&password=pw"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/tasks");

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_renders() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let response = app
        .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Sign in"));
    assert!(html.contains("action=\"/login\""));
}

#[tokio::test]
async fn anonymous_visitor_is_sent_to_login() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let response = app
        .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn login_then_board_shows_tasks() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/tarefas"))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "titulo": "write report",
                "descricao": "quarterly numbers",
                "status": false,
                "usuario": {"id": 7, "nome": "Ana", "ativo": true}
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "nome": "Ana", "ativo": true}
        ])))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("write report"));
    assert!(html.contains("Signed in as <strong>ana</strong>"));
    assert!(html.contains("<option value=\"7\">Ana</option>"));
}

#[tokio::test]
async fn failed_login_shows_error_and_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=ana&password=nope"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Re-rendered inline, one unspecific message.
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Invalid username or password."));

    // Still anonymous: the board bounces straight back to login.
    let response = app
        .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn expired_credential_forces_relogin_and_clears_the_session() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    // The credential dies after login: the first board load sees 401, and
    // afterwards the backend would even be healthy again.
    Mock::given(method("GET"))
        .and(path("/tarefas"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mock_empty_lists(&server).await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/login?expired=true"
    );

    // Same cookie again: the session record is gone, so the redirect is the
    // plain anonymous one and the backend is not consulted.
    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn save_failure_surfaces_as_banner_on_the_board() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    mock_empty_lists(&server).await;
    Mock::given(method("POST"))
        .and(path("/tarefas"))
        .respond_with(ResponseTemplate::new(400).set_body_string("title must not be blank"))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(COOKIE, &cookie)
                .body(Body::from("id=&title=x&description=&due_date=&assignee_id=7"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/tasks");

    // The banner rides the session across the redirect, once.
    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    let html = body_text(response).await;
    assert!(html.contains("Could not save the task"));
    assert!(html.contains("title must not be blank"));

    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    let html = body_text(response).await;
    assert!(!html.contains("Could not save the task"));
}

#[tokio::test]
async fn create_posts_to_the_collection_with_assignee_id_only() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    Mock::given(method("POST"))
        .and(path("/tarefas"))
        .and(body_partial_json(serde_json::json!({
            "titulo": "write report",
            "usuario": {"id": 7}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 10,
            "titulo": "write report",
            "status": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(COOKIE, &cookie)
                .body(Body::from(
                    "id=&title=write+report&description=&due_date=&assignee_id=7",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/tasks");
}

#[tokio::test]
async fn update_puts_to_the_item_path() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    Mock::given(method("PUT"))
        .and(path("/tarefas/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "titulo": "write report",
            "status": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(COOKIE, &cookie)
                .body(Body::from(
                    "id=12&title=write+report&description=&due_date=&done=on&assignee_id=7",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn delete_follows_the_item_path_and_flashes() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    mock_empty_lists(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/tarefas/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = get_with_cookie(&app, "/tasks/delete/3", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/tasks");

    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    let html = body_text(response).await;
    assert!(html.contains("Task deleted."));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    mock_empty_lists(&server).await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    let response = get_with_cookie(&app, "/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");

    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn lenient_lists_keep_the_board_up_when_the_backend_stumbles() {
    let server = MockServer::start().await;
    mock_login_success(&server).await;
    Mock::given(method("GET"))
        .and(path("/tarefas"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let cookie = sign_in(&app).await;

    // Listing failures degrade to an empty board, not an error page and not
    // a logout.
    let response = get_with_cookie(&app, "/tasks", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Signed in as <strong>ana</strong>"));
}

#[tokio::test]
async fn register_without_a_session_posts_bare() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_partial_json(serde_json::json!({"nome": "Ana"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Ana&birth_date=1990-01-01&active=on"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
}

#[tokio::test]
async fn register_conflict_re_renders_with_the_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(409).set_body_string("username taken"))
        .mount(&server)
        .await;

    let app = app_for(&server);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=Ana"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Could not register"));
    assert!(html.contains("username taken"));
}
