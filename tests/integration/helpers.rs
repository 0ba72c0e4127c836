//! Shared test helpers for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use dropand_api::{AppState, build_app};
use dropand_core::config::{AppConfig, StoreProvider};
use dropand_core::error::AppError;
use dropand_core::result::AppResult;
use dropand_core::types::DirectoryId;
use dropand_database::MemoryDirectoryBackend;
use dropand_database::store::{DirectoryBackend, DirectoryStore, DirectoryTransaction};
use dropand_entity::directory::{Directory, NewDirectory};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// Captured response
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body parsed as JSON, or `Null`
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `name=value` pair of the first `Set-Cookie` header.
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

impl TestApp {
    /// Create a new test application on an empty in-memory store
    pub fn new() -> Self {
        Self::with_backend(Arc::new(MemoryDirectoryBackend::new()))
    }

    /// Create a test application on the given store backend
    pub fn with_backend(backend: Arc<dyn DirectoryBackend>) -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let state = AppState::new(config.clone(), backend).expect("Failed to build state");

        Self {
            router: build_app(state),
            config,
        }
    }

    /// Submit the login form and return the session cookie
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self.submit_login(username, password).await;

        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(
            response.location(),
            Some(self.config.auth.default_success_url.as_str()),
            "Login failed"
        );

        response.cookie().expect("No session cookie set")
    }

    /// Log in as the seeded administrator
    pub async fn login_admin(&self) -> String {
        self.login("admin", "admin").await
    }

    /// POST the login form
    pub async fn submit_login(&self, username: &str, password: &str) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(&self.config.auth.login_path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("username={username}&password={password}")))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make an HTTP request with an optional JSON body and session cookie
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    /// Create a directory and return its id
    pub async fn create_directory(&self, cookie: &str, name: &str, parent_id: Option<i64>) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/directories",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(cookie),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["id"].as_i64().expect("No id in response")
    }
}

/// In-memory backend whose inserts always fail with a database error.
#[derive(Debug, Default)]
pub struct FailingInsertBackend(MemoryDirectoryBackend);

struct FailingInsertTransaction(Box<dyn DirectoryTransaction>);

#[async_trait]
impl DirectoryBackend for FailingInsertBackend {
    async fn begin(&self) -> AppResult<Box<dyn DirectoryTransaction>> {
        Ok(Box::new(FailingInsertTransaction(self.0.begin().await?)))
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.0.health_check().await
    }

    fn name(&self) -> &'static str {
        "failing-insert"
    }
}

#[async_trait]
impl DirectoryStore for FailingInsertTransaction {
    async fn get(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        self.0.get(id).await
    }

    async fn find_children(&self, parent_id: DirectoryId) -> AppResult<Vec<Directory>> {
        self.0.find_children(parent_id).await
    }

    async fn find_roots(&self) -> AppResult<Vec<Directory>> {
        self.0.find_roots().await
    }

    async fn has_children(&self, id: DirectoryId) -> AppResult<bool> {
        self.0.has_children(id).await
    }

    async fn max_sort_order(&self, parent_id: Option<DirectoryId>) -> AppResult<Option<i32>> {
        self.0.max_sort_order(parent_id).await
    }

    async fn insert(&self, _data: &NewDirectory) -> AppResult<Directory> {
        Err(AppError::database("connection reset"))
    }

    async fn update(&self, directory: &Directory) -> AppResult<Directory> {
        self.0.update(directory).await
    }

    async fn delete(&self, id: DirectoryId) -> AppResult<bool> {
        self.0.delete(id).await
    }
}

#[async_trait]
impl DirectoryTransaction for FailingInsertTransaction {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        let FailingInsertTransaction(inner) = *self;
        inner.commit().await
    }
}
