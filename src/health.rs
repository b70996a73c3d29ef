use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{db, state::AppState};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner")),
    tag = "health"
)]
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Intern Management System API" }))
}

/// Liveness probe; `database` reports whether the pool answers a query.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service health", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = db::ping(&state.db).await;
    if !database {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthResponse {
        status: "healthy".to_string(),
        database,
    })
}
