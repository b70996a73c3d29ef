//! HTTP-level integration tests for profiles, avatars and user administration.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, create_test_user, delete_auth, get, get_auth, put_json_auth, send_raw};
use sqlx::PgPool;

fn avatar_request(token: &str, content_type: &str, file_name: &str, data: &[u8]) -> Request<Body> {
    let boundary = "intern-manager-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/users/profile/avatar")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_read_and_update(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "profiler", false).await;
    create_test_user(&pool, "taken", false).await;

    let json = body_json(get_auth(app.clone(), "/api/users/profile", &token).await).await;
    assert_eq!(json["username"], "profiler");

    let body = serde_json::json!({ "full_name": "Pro Filer", "department": "People", "phone": "555-1234" });
    let response = put_json_auth(app.clone(), "/api/users/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["full_name"], "Pro Filer");
    assert_eq!(json["department"], "People");
    assert_eq!(json["username"], "profiler");

    let body = serde_json::json!({ "email": "taken@test.com" });
    let response = put_json_auth(app, "/api/users/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_rejects_blank_username(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "keepname", false).await;

    for username in ["   ", " ab "] {
        let body = serde_json::json!({ "username": username });
        let response = put_json_auth(app.clone(), "/api/users/profile", &token, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let json = body_json(get_auth(app.clone(), "/api/users/profile", &token).await).await;
    assert_eq!(json["username"], "keepname");

    let body = serde_json::json!({ "username": "  renamed  " });
    let response = put_json_auth(app, "/api/users/profile", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["username"], "renamed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_avatar_upload(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "painter", false).await;

    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    let response = send_raw(app.clone(), avatar_request(&token, "image/png", "me.png", &png)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let url = json["avatar_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/avatars/"));
    assert!(url.ends_with(".png"));

    // The stored file is served back.
    let response = get(app.clone(), &url).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app.clone(), "/api/users/profile", &token).await).await;
    assert_eq!(json["avatar_url"], url.as_str());

    let response = send_raw(app, avatar_request(&token, "text/plain", "notes.txt", b"hello")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user_is_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_token = common::login_as(&app, &pool, "root", true).await;
    let user_token = common::login_as(&app, &pool, "plain", false).await;
    let victim = create_test_user(&pool, "victim", false).await;
    let uri = format!("/api/users/{}", victim.id);

    let response = get_auth(app.clone(), &uri, &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app.clone(), &uri, &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app, "/api/users", &admin_token).await).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"root"));
    assert!(!names.contains(&"victim"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_removed_admin_cannot_delete_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_token = common::login_as(&app, &pool, "formeradmin", true).await;
    let victim = create_test_user(&pool, "survivor", false).await;

    sqlx::query("DELETE FROM users WHERE username = 'formeradmin'")
        .execute(&pool)
        .await
        .unwrap();

    let response = delete_auth(app, &format!("/api/users/{}", victim.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let still_there: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(victim.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(still_there, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_demoted_admin_cannot_delete_users(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_token = common::login_as(&app, &pool, "demoted", true).await;
    let victim = create_test_user(&pool, "bystander", false).await;

    sqlx::query("UPDATE users SET is_admin = FALSE WHERE username = 'demoted'")
        .execute(&pool)
        .await
        .unwrap();

    let response = delete_auth(app, &format!("/api/users/{}", victim.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
