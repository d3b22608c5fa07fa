use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use marquee_api::config::AppConfig;
use marquee_api::server::{app, AppState};
use marquee_api::store::memory::MemoryStore;

pub const SECRET: &str = "integration-test-secret";

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.jwt_secret = SECRET.to_string();
    // MIN_COST keeps the suite fast; hashing strength is not under test
    config.security.bcrypt_cost = bcrypt::MIN_COST;
    config
}

/// Full router over a fresh in-memory store.
pub fn test_app() -> Router {
    test_app_with_store().0
}

/// Full router plus a handle on the backing store, for tests that
/// assert what did (or did not) reach persistence.
pub fn test_app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_stores(test_config(), store.clone(), store.clone());
    (app(state), store)
}

/// Drive one request through the router and decode the JSON response.
pub async fn request(
    router: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .context("failed to build request")?;

    let response = router
        .clone()
        .oneshot(request)
        .await
        .context("router call failed")?;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .context("failed to read response body")?;

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).context("response body is not JSON")?
    };

    Ok((status, value))
}

pub async fn signup(
    router: &Router,
    username: &str,
    password: &str,
) -> Result<(StatusCode, Value)> {
    request(
        router,
        Method::POST,
        "/signup",
        None,
        Some(json!({ "name": "Test User", "username": username, "password": password })),
    )
    .await
}

/// Sign up and sign in, returning the `JWT `-prefixed token ready for
/// the Authorization header.
pub async fn authenticated_token(router: &Router, username: &str) -> Result<String> {
    let (status, _) = signup(router, username, "hunter2").await?;
    anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {status}");

    let (status, body) = request(
        router,
        Method::POST,
        "/signin",
        None,
        Some(json!({ "username": username, "password": "hunter2" })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "signin failed: {status}");

    body["token"]
        .as_str()
        .map(str::to_string)
        .context("signin response carried no token")
}

pub fn sample_movie(title: &str) -> Value {
    json!({
        "title": title,
        "releaseDate": "1999-03-31",
        "genre": "Sci-Fi",
        "actors": ["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"],
    })
}
