#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::auth::domain::{CurrentUser, Role};
use service::auth::TokenService;
use service::commons::repository::mock::{InMemoryCommonsRepository, InMemoryUserCommonsRepository};
use service::commons::CommonsService;

pub const SECRET: &str = "test-secret";
pub const USER_ID: i64 = 42;
pub const ADMIN_ID: i64 = 1;

pub struct TestApp {
    pub router: Router,
    pub memberships: Arc<InMemoryUserCommonsRepository>,
}

/// Router over in-memory repositories, no database needed.
pub fn build_app() -> TestApp {
    let commons = Arc::new(InMemoryCommonsRepository::default());
    let memberships = Arc::new(InMemoryUserCommonsRepository::default());
    let state = ServerState {
        commons: Arc::new(CommonsService::new(commons, memberships.clone())),
        tokens: Arc::new(TokenService::new(SECRET, 3600)),
    };
    let router = routes::build_router(state, CorsLayer::very_permissive(), None);
    TestApp { router, memberships }
}

pub fn token_for(id: i64, email: &str, roles: Vec<Role>) -> String {
    TokenService::new(SECRET, 3600)
        .issue(&CurrentUser { id, email: email.into(), roles })
        .expect("issue token")
}

pub fn user_token() -> String {
    token_for(USER_ID, "user@example.com", vec![Role::User])
}

pub fn admin_token() -> String {
    token_for(ADMIN_ID, "admin@example.com", vec![Role::User, Role::Admin])
}

pub fn create_body(name: &str) -> Value {
    json!({
        "name": name,
        "cowPrice": 10.0,
        "milkPrice": 5.0,
        "startingBalance": 1000.0,
        "startingDate": "2024-01-01T00:00:00",
        "endingDate": "2024-03-01T00:00:00"
    })
}

/// Send one request; the body comes back as JSON (`Null` when empty or not JSON).
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Create a commons as admin and return its id.
pub async fn create_commons(router: &Router, name: &str) -> i64 {
    let (status, body) = send(router, Method::POST, "/api/commons/new", Some(&admin_token()), Some(create_body(name))).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_i64().unwrap()
}
