#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use intern_manager::auth::hash_password;
use intern_manager::user::user_models::NewUser;
use intern_manager::user::{User, UserRepository};
use intern_manager::{create_router, AppState, Config};

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `Config` with safe defaults and a throwaway upload directory.
pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: "integration-test-secret".to_string(),
        access_token_expire_minutes: 30,
        refresh_token_expire_days: 7,
        host: "127.0.0.1".to_string(),
        port: 0,
        upload_dir: std::env::temp_dir().join(format!("intern-manager-{}", uuid::Uuid::new_v4())),
        max_upload_bytes: 64 * 1024,
        cors_origins: vec!["http://localhost:5173".to_string()],
        overdue_sweep_cron: "0 * * * * *".to_string(),
        admin_username: "admin".to_string(),
        admin_email: "admin@example.com".to_string(),
        admin_password: None,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState::new(pool, Arc::new(test_config()))
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    create_router(test_state(pool))
}

/// Insert a user directly and return it.
pub async fn create_test_user(pool: &PgPool, username: &str, is_admin: bool) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepository::new(pool.clone())
        .create(NewUser {
            username,
            email: &format!("{username}@test.com"),
            password_hash: &hashed,
            full_name: Some("Test User"),
            is_admin,
        })
        .await
        .expect("user creation should succeed")
}

/// Create a user, log in through the API and return the access token.
pub async fn login_as(app: &Router, pool: &PgPool, username: &str, is_admin: bool) -> String {
    create_test_user(pool, username, is_admin).await;

    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login must return an access token")
        .to_string()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router is infallible")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::GET, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::PATCH, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::PUT, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder(Method::DELETE, uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn send_raw(app: Router, request: Request<Body>) -> Response {
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Create an intern through the API and return its JSON.
pub async fn create_intern(
    app: &Router,
    token: &str,
    name: &str,
    email: &str,
    department: &str,
) -> serde_json::Value {
    let body = serde_json::json!({
        "full_name": name,
        "email": email,
        "department": department,
        "phone": "555-0100",
        "skills": ["Rust", " rust ", ""],
    });
    let response = post_json_auth(app.clone(), "/api/interns", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
