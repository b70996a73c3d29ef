use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    middleware::AuthUser,
    state::AppState,
    user::{
        user_dto::{AvatarResponse, UpdateProfileRequest},
        user_models::UserResponse,
    },
};

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    Ok(Json(state.user_service.list_users().await?))
}

/// Get current user profile
#[utoipa::path(
    get,
    path = "/api/users/profile",
    tag = "users",
    responses(
        (status = 200, description = "User profile retrieved successfully", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>> {
    Ok(Json(state.user_service.get_profile(user.id).await?))
}

/// Update current user profile
#[utoipa::path(
    put,
    path = "/api/users/profile",
    tag = "users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = UserResponse),
        (status = 400, description = "Invalid input or username/email in use"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let payload = payload.normalized();
    payload.validate()?;

    Ok(Json(state.user_service.update_profile(user.id, payload).await?))
}

/// Upload a new avatar image (multipart field `file`)
#[utoipa::path(
    post,
    path = "/api/users/profile/avatar",
    tag = "users",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Image in field `file`"),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (status = 400, description = "Missing or unsupported file"),
        (status = 413, description = "File too large"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;

        let avatar_url = state
            .user_service
            .save_avatar(user.id, content_type.as_deref(), file_name.as_deref(), &bytes)
            .await?;

        return Ok(Json(AvatarResponse { avatar_url }));
    }

    Err(AppError::BadRequest("Missing file field".to_string()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User retrieved successfully", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>> {
    Ok(Json(state.user_service.get_user(user_id).await?))
}

/// Delete user (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Cannot delete own account"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let username = state.user_service.delete_user(actor.id, user_id).await?;

    Ok(Json(json!({
        "message": format!("User {} deleted successfully", username)
    })))
}
