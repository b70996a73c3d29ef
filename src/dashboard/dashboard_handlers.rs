use axum::{
    extract::{Query, State},
    Json,
};

use crate::{error::Result, state::AppState};
use super::dashboard_dto::{DashboardStats, DepartmentStats, TopPerformer, TopPerformersQuery};

/// Headline counters for interns and tasks
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(state.dashboard_service.stats().await?))
}

/// Intern headcount per department
#[utoipa::path(
    get,
    path = "/api/dashboard/departments",
    responses(
        (status = 200, description = "Interns per department", body = Vec<DepartmentStats>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_department_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<DepartmentStats>>> {
    Ok(Json(state.dashboard_service.departments().await?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/top-performers",
    params(TopPerformersQuery),
    responses(
        (status = 200, description = "Interns with the best completion rate", body = Vec<TopPerformer>),
        (status = 400, description = "Invalid limit"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "dashboard",
    security(("bearer_auth" = []))
)]
pub async fn get_top_performers(
    State(state): State<AppState>,
    Query(query): Query<TopPerformersQuery>,
) -> Result<Json<Vec<TopPerformer>>> {
    Ok(Json(state.dashboard_service.top_performers(query.limit).await?))
}
