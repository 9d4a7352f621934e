//! End-to-end test harness for the Brocante marketplace service.
//!
//! Drives the real router in-process with `tower::ServiceExt::oneshot`, so
//! every test exercises routing, extraction, the store, and serialization
//! exactly as a network client would.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use brocante_api::config::AppConfig;
use brocante_api::routes;
use brocante_api::services::auth::Authenticator;
use brocante_api::state::AppState;
use brocante_api::store::DocumentStore;

/// Base URL configured for link enrichment in tests.
pub const BASE_URL: &str = "http://localhost:3000";

/// Configuration used by every test app.
#[must_use]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: BASE_URL.to_string(),
        jwt_secret: SecretString::from("integration-test-secret-0123456789abcdef"),
    }
}

/// A fresh app over an empty store.
#[must_use]
pub fn app() -> Router {
    routes::app(AppState::new(test_config(), DocumentStore::new()))
}

/// A fresh app whose tokens carry a custom lifetime.
#[must_use]
pub fn app_with_token_ttl(ttl: chrono::Duration) -> Router {
    let config = test_config();
    let authenticator = Authenticator::with_ttl(&config.jwt_secret, ttl);
    routes::app(AppState::with_authenticator(
        config,
        DocumentStore::new(),
        authenticator,
    ))
}

/// Send one request and return the status plus the parsed JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Sign up an account; panics unless the service answers 201.
pub async fn signup(app: &Router, email: &str, name: &str, password: &str, city: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/auth/signup",
        None,
        Some(json!({
            "email": email,
            "name": name,
            "password": password,
            "password_confirmation": password,
            "city": city,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body
}

/// Log in and return the bearer token plus the user representation.
pub async fn login(app: &Router, email: &str, password: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["token"].as_str().unwrap().to_string();
    (token, body["user"].clone())
}

/// Sign up and log in, returning the bearer token.
pub async fn register(app: &Router, email: &str, name: &str) -> String {
    signup(app, email, name, "hunter2", "Quebec").await;
    let (token, _) = login(app, email, "hunter2").await;
    token
}

/// Create a category and return its id.
pub async fn create_category(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/categories",
        Some(token),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "category creation failed: {body}");
    body["category"]["id"].as_str().unwrap().to_string()
}

/// Create a product and return its representation.
pub async fn create_product(
    app: &Router,
    token: &str,
    name: &str,
    price: &str,
    category_id: &str,
) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/products",
        Some(token),
        Some(json!({
            "name": name,
            "description": "desc",
            "price": price,
            "imageUrl": "http://x/1.jpg",
            "category": category_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "product creation failed: {body}");
    body["product"].clone()
}
