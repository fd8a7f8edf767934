//! Shared helpers for router-level tests

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use postboard_server::db::{create_memory_pool, migrations};
use postboard_server::{build_router, AppState, ServerConfig};

/// Route server logs to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // already installed by an earlier test in this binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Router over a fresh, migrated in-memory database.
pub async fn app() -> Router {
    init_tracing();
    let pool = create_memory_pool().await.expect("pool");
    migrations::run(&pool).await.expect("migrations");
    build_router(AppState::new(pool), &ServerConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None).await
}

/// Create a user through the API and return its id.
pub async fn create_user(app: &Router, username: &str, email: &str) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/users",
        Some(serde_json::json!({ "username": username, "email": email })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()["id"].as_i64().unwrap()
}

/// Create a post through the API and return its id.
pub async fn create_post(app: &Router, title: &str, content: &str, user_id: i64) -> i64 {
    let response = send(
        app,
        "POST",
        "/api/posts",
        Some(serde_json::json!({ "title": title, "content": content, "user_id": user_id })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.json()["id"].as_i64().unwrap()
}
