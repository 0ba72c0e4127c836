//! Integration tests for the login gate.

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_protected_api_redirects_to_login() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/directories", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_login_page_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/login", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains(r#"name="username""#));
    assert!(response.text.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_login_page_shows_error_flag() {
    let app = TestApp::new();

    let response = app.request("GET", "/login?error=true", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = TestApp::new();

    let cookie = app.login_admin().await;

    assert!(cookie.starts_with("DROPAND_SESSION="));
    let response = app
        .request("GET", "/api/directories", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_login_wrong_password_redirects_with_error() {
    let app = TestApp::new();

    let response = app.submit_login("admin", "wrong").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login?error=true"));
    assert!(response.cookie().is_none());
}

#[tokio::test]
async fn test_login_unknown_user_redirects_with_error() {
    let app = TestApp::new();

    let response = app.submit_login("nobody", "admin").await;

    assert_eq!(response.location(), Some("/login?error=true"));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;
    let token = cookie
        .split_once('=')
        .map(|(_, value)| value.to_string())
        .expect("Malformed cookie");

    let req = Request::builder()
        .method("GET")
        .uri("/api/directories")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_cookie_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/directories",
            None,
            Some("DROPAND_SESSION=not.a.token"),
        )
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let response = app.request("POST", "/logout", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login?logout=true"));
    let cleared = response.cookie().expect("No removal cookie");
    assert_eq!(cleared, "DROPAND_SESSION=");
}

#[tokio::test]
async fn test_root_redirects_to_front_end() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let response = app.request("GET", "/", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/html5/index.html"));
}

#[tokio::test]
async fn test_public_assets_skip_login() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/html5/css_html5/missing.css", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_front_end_page_requires_login() {
    let app = TestApp::new();

    let response = app.request("GET", "/html5/index.html", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
}

#[tokio::test]
async fn test_logged_in_user_gets_front_end_page() {
    let app = TestApp::new();
    let cookie = app.login_admin().await;

    let response = app
        .request("GET", "/html5/index.html", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("js_html5/tree.js"));
}
