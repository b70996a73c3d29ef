use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::Result,
    notification::MessageResponse,
    state::AppState,
};
use super::{
    task_dto::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
    task_models::Task,
};

/// Tasks assigned to an intern, earliest deadline first
#[utoipa::path(
    get,
    path = "/api/tasks/intern/{intern_id}",
    params(
        ("intern_id" = i64, Path, description = "Intern ID"),
        TaskListQuery
    ),
    responses(
        (status = 200, description = "Tasks of the intern", body = Vec<Task>),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_intern_tasks(
    State(state): State<AppState>,
    Path(intern_id): Path<i64>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<Task>>> {
    let tasks = state
        .task_service
        .list_for_intern(intern_id, query.status)
        .await?;
    Ok(Json(tasks))
}

/// Get a task
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>> {
    Ok(Json(state.task_service.get_task(task_id).await?))
}

/// Assign a new task to an intern
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    let task = state.task_service.create_task(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    Ok(Json(state.task_service.update_task(task_id, payload).await?))
}

/// Mark a task as completed
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/complete",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task completed", body = Task),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>> {
    Ok(Json(state.task_service.complete_task(task_id).await?))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponse),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.task_service.delete_task(task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
