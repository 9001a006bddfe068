//! Shared helpers for API integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router,
//! so tests exercise the exact middleware stack production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fleetdesk_api::config::ServerConfig;
use fleetdesk_api::router::build_app_router;
use fleetdesk_api::state::AppState;

/// Tenant ID used by the default request helpers.
pub const TEST_TENANT: i64 = 1;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request as [`TEST_TENANT`].
pub async fn get(app: Router, path: &str) -> Response<Body> {
    get_as(app, path, TEST_TENANT).await
}

/// Send a GET request as a specific tenant.
pub async fn get_as(app: Router, path: &str, tenant_id: i64) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header("x-tenant-id", tenant_id.to_string())
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body as [`TEST_TENANT`].
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    post_json_as(app, path, body, TEST_TENANT).await
}

/// Send a POST request with a JSON body as a specific tenant.
pub async fn post_json_as(
    app: Router,
    path: &str,
    body: serde_json::Value,
    tenant_id: i64,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header("x-tenant-id", tenant_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request with no tenant header at all.
pub async fn get_anonymous(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
