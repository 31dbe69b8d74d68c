#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fabula_api::config::ServerConfig;
use fabula_api::middleware::auth::ACCESS_TOKEN_HEADER;
use fabula_api::router::build_app_router;
use fabula_api::state::AppState;

/// Shared secret used by [`build_guarded_app`].
pub const TEST_TOKEN: &str = "test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// Matches the development defaults: `/api` prefix, `http://localhost:5173`
/// as CORS origin, a 30-second request timeout and no access token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://localhost/fabula_test".to_string(),
        db_max_connections: 5,
        api_prefix: "/api".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        access_token: None,
    }
}

/// Build the full application router over `pool` with the given config.
pub fn build_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState {
        pool,
        config: Arc::new(config),
    })
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through the same `build_app_router` as `main.rs`, so integration
/// tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with(pool, test_config())
}

/// Like [`build_test_app`] but with `SECRET_TOKEN` set to [`TEST_TOKEN`].
pub fn build_guarded_app(pool: PgPool) -> Router {
    build_app_with(
        pool,
        ServerConfig {
            access_token: Some(TEST_TOKEN.to_string()),
            ..test_config()
        },
    )
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, body)).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// POST with an explicit `x-access-token` header.
pub async fn post_json_with_token(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let mut request = json_request(Method::POST, uri, body);
    request
        .headers_mut()
        .insert(ACCESS_TOKEN_HEADER, token.parse().unwrap());
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create an author through the API and return its id.
pub async fn create_author(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/authors", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["author"]["id"].as_i64().unwrap()
}

/// Create a novel through the API and return its id.
pub async fn create_novel(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/novels", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["novel"]["id"].as_i64().unwrap()
}

/// Create a character through the API and return its id.
pub async fn create_character(pool: &PgPool, body: serde_json::Value) -> i64 {
    let response = post_json(build_test_app(pool.clone()), "/api/characters", body).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["character"]["id"].as_i64().unwrap()
}
