//! HTTP-level integration tests for task assignment, completion and the overdue sweep.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    body_json, create_intern, delete_auth, get_auth, patch_auth, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

async fn create_task(
    app: &axum::Router,
    token: &str,
    intern_id: i64,
    title: &str,
    deadline: chrono::DateTime<Utc>,
) -> serde_json::Value {
    let body = serde_json::json!({
        "intern_id": intern_id,
        "title": title,
        "description": "Details",
        "deadline": deadline,
    });
    let response = post_json_auth(app.clone(), "/api/tasks", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_task_for_missing_intern(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;

    let body = serde_json::json!({
        "intern_id": 987654,
        "title": "Ghost task",
        "deadline": Utc::now() + Duration::days(1),
    });
    let response = post_json_auth(app, "/api/tasks", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["detail"], "Intern not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_task_status_follows_deadline(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;
    let intern = create_intern(&app, &token, "Jon", "jon@example.com", "Engineering").await;
    let intern_id = intern["id"].as_i64().unwrap();

    let future = create_task(&app, &token, intern_id, "Future", Utc::now() + Duration::days(3)).await;
    assert_eq!(future["status"], "pending");

    let late = create_task(&app, &token, intern_id, "Late", Utc::now() - Duration::days(1)).await;
    assert_eq!(late["status"], "overdue");

    // Moving the deadline forward reopens the task.
    let body = serde_json::json!({ "deadline": Utc::now() + Duration::days(2) });
    let response = put_json_auth(app.clone(), &format!("/api/tasks/{}", late["id"]), &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_tasks_for_intern(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;
    let intern = create_intern(&app, &token, "Kim", "kim@example.com", "Engineering").await;
    let intern_id = intern["id"].as_i64().unwrap();

    create_task(&app, &token, intern_id, "Second", Utc::now() + Duration::days(5)).await;
    let first = create_task(&app, &token, intern_id, "First", Utc::now() + Duration::days(1)).await;
    patch_auth(app.clone(), &format!("/api/tasks/{}/complete", first["id"]), &token).await;

    let uri = format!("/api/tasks/intern/{intern_id}");
    let json = body_json(get_auth(app.clone(), &uri, &token).await).await;
    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);

    let json = body_json(get_auth(app.clone(), &format!("{uri}?status=completed"), &token).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "First");

    let response = get_auth(app, "/api/tasks/intern/555555", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_task_updates_intern_stats(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;
    let intern = create_intern(&app, &token, "Lee", "lee@example.com", "Engineering").await;
    let intern_id = intern["id"].as_i64().unwrap();

    let task = create_task(&app, &token, intern_id, "Ship it", Utc::now() + Duration::days(1)).await;
    create_task(&app, &token, intern_id, "Review", Utc::now() + Duration::days(1)).await;

    let response = patch_auth(app.clone(), &format!("/api/tasks/{}/complete", task["id"]), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "completed");

    let json = body_json(get_auth(app, &format!("/api/interns/{intern_id}"), &token).await).await;
    assert_eq!(json["task_stats"]["total_tasks"], 2);
    assert_eq!(json["task_stats"]["completed_tasks"], 1);
    assert_eq!(json["task_stats"]["pending_tasks"], 1);
    assert_eq!(json["task_stats"]["completion_rate"], 50.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_and_delete_task(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;
    let intern = create_intern(&app, &token, "Max", "max@example.com", "Ops").await;
    let task = create_task(&app, &token, intern["id"].as_i64().unwrap(), "Temp", Utc::now() + Duration::days(1)).await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["description"], "Details");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overdue_sweep_flips_late_pending_tasks(pool: PgPool) {
    let state = common::test_state(pool.clone());
    let app = intern_manager::create_router(state.clone());
    let token = common::login_as(&app, &pool, "lead", false).await;
    let intern = create_intern(&app, &token, "Nia", "nia@example.com", "Ops").await;
    let task = create_task(&app, &token, intern["id"].as_i64().unwrap(), "Soon", Utc::now() + Duration::days(1)).await;

    sqlx::query("UPDATE tasks SET deadline = NOW() - INTERVAL '1 hour' WHERE id = $1")
        .bind(task["id"].as_i64().unwrap())
        .execute(&pool)
        .await
        .unwrap();

    let flipped = state.task_service.sweep_overdue().await.unwrap();
    assert_eq!(flipped, 1);

    let json = body_json(get_auth(app, &format!("/api/tasks/{}", task["id"]), &token).await).await;
    assert_eq!(json["status"], "overdue");

    // Nothing left to flip.
    assert_eq!(state.task_service.sweep_overdue().await.unwrap(), 0);
}
