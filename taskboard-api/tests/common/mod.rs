/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An in-memory store the test keeps a handle to
/// - A router built exactly as the binary builds it
/// - JSON request helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{Config, Environment};
use taskboard_shared::store::{memory::MemoryStore, Store};
use tower::ServiceExt;

/// Host header sent with every request
pub const TEST_HOST: &str = "taskboard.test";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context in test mode around an empty store
    pub fn new() -> Self {
        Self::with_environment(Environment::Test)
    }

    /// Creates a context with the given runtime mode
    pub fn with_environment(environment: Environment) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mut config = Config::for_tests();
        config.api.environment = environment;

        let shared: Arc<dyn Store> = store.clone();
        let app = build_router(AppState::with_shared_store(shared, config));

        Self { store, app }
    }

    /// Sends a request with an optional JSON body and returns status and JSON
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("host", TEST_HOST);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Sends a prepared request and returns status and JSON
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }
}

/// Helper to create a user through the API and return its ID
pub async fn create_test_user(ctx: &TestContext, email: &str) -> i32 {
    let (status, body) = ctx
        .post(
            "/users",
            serde_json::json!({ "name": "Test User", "email": email, "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "user creation failed: {}", body);

    id_from_url(&body["url"])
}

/// Helper to create a project owned by `owner_id`
pub async fn create_test_project(ctx: &TestContext, owner_id: i32) -> i32 {
    let (status, body) = ctx
        .post(
            "/projects",
            serde_json::json!({ "name": "Test Project", "owner_id": owner_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "project creation failed: {}", body);

    id_from_url(&body["url"])
}

/// Helper to create a task in `project_id`
pub async fn create_test_task(ctx: &TestContext, project_id: i32) -> i32 {
    let (status, body) = ctx
        .post(
            "/tasks",
            serde_json::json!({ "title": "Test Task", "project_id": project_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "task creation failed: {}", body);

    id_from_url(&body["url"])
}

/// Parses the trailing ID segment of a resource URL
pub fn id_from_url(url: &Value) -> i32 {
    url.as_str()
        .and_then(|u| u.rsplit('/').next())
        .and_then(|id| id.parse().ok())
        .unwrap_or_else(|| panic!("no id in url {}", url))
}
