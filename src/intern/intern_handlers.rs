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
    intern_dto::{
        CreateInternRequest, InternListQuery, InternsListResponse, UpdateInternRequest,
        UpdateInternStatusRequest,
    },
    intern_models::{Intern, InternWithStats},
    intern_wizard::{WizardValidateRequest, WizardValidateResponse},
};

/// List interns with search, filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/interns",
    params(InternListQuery),
    responses(
        (status = 200, description = "Page of interns", body = InternsListResponse),
        (status = 400, description = "Invalid pagination"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn get_interns(
    State(state): State<AppState>,
    Query(query): Query<InternListQuery>,
) -> Result<Json<InternsListResponse>> {
    Ok(Json(state.intern_service.list_interns(query).await?))
}

/// Get one intern with task statistics
#[utoipa::path(
    get,
    path = "/api/interns/{id}",
    params(("id" = i64, Path, description = "Intern ID")),
    responses(
        (status = 200, description = "Intern with task statistics", body = InternWithStats),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn get_intern(
    State(state): State<AppState>,
    Path(intern_id): Path<i64>,
) -> Result<Json<InternWithStats>> {
    Ok(Json(state.intern_service.get_intern(intern_id).await?))
}

/// Create an intern
#[utoipa::path(
    post,
    path = "/api/interns",
    request_body = CreateInternRequest,
    responses(
        (status = 201, description = "Intern created", body = Intern),
        (status = 400, description = "Validation error or email already registered"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn create_intern(
    State(state): State<AppState>,
    Json(payload): Json<CreateInternRequest>,
) -> Result<impl IntoResponse> {
    let intern = state.intern_service.create_intern(payload).await?;
    Ok((StatusCode::CREATED, Json(intern)))
}

/// Update an intern; only fields present in the body change
#[utoipa::path(
    put,
    path = "/api/interns/{id}",
    params(("id" = i64, Path, description = "Intern ID")),
    request_body = UpdateInternRequest,
    responses(
        (status = 200, description = "Intern updated", body = Intern),
        (status = 400, description = "Validation error or email already registered"),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn update_intern(
    State(state): State<AppState>,
    Path(intern_id): Path<i64>,
    Json(payload): Json<UpdateInternRequest>,
) -> Result<Json<Intern>> {
    Ok(Json(state.intern_service.update_intern(intern_id, payload).await?))
}

/// Set or toggle an intern's active status
#[utoipa::path(
    patch,
    path = "/api/interns/{id}/status",
    params(("id" = i64, Path, description = "Intern ID")),
    request_body = UpdateInternStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Intern),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn update_intern_status(
    State(state): State<AppState>,
    Path(intern_id): Path<i64>,
    payload: Option<Json<UpdateInternStatusRequest>>,
) -> Result<Json<Intern>> {
    let status = payload.and_then(|Json(p)| p.status);
    Ok(Json(state.intern_service.set_status(intern_id, status).await?))
}

/// Delete an intern and all of their tasks
#[utoipa::path(
    delete,
    path = "/api/interns/{id}",
    params(("id" = i64, Path, description = "Intern ID")),
    responses(
        (status = 200, description = "Intern deleted", body = MessageResponse),
        (status = 404, description = "Intern not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn delete_intern(
    State(state): State<AppState>,
    Path(intern_id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.intern_service.delete_intern(intern_id).await?;
    Ok(Json(MessageResponse::new("Intern deleted successfully")))
}

/// Validate one step of the add/edit intern wizard
#[utoipa::path(
    post,
    path = "/api/interns/wizard/validate",
    request_body = WizardValidateRequest,
    responses(
        (status = 200, description = "Step validation result", body = WizardValidateResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "interns",
    security(("bearer_auth" = []))
)]
pub async fn validate_wizard_step(
    State(state): State<AppState>,
    Json(payload): Json<WizardValidateRequest>,
) -> Result<Json<WizardValidateResponse>> {
    Ok(Json(state.intern_service.validate_wizard_step(payload).await?))
}
