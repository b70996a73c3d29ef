use crate::{
    error::Result,
    middleware::AuthUser,
    state::AppState,
    user::user_models::UserResponse,
};
use super::{
    auth_dto::{AuthResponse, RefreshTokenRequest, RefreshTokenResponse},
    credentials::LoginCredentials,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

/// Login with username (or email) and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(
        content = LoginRequest,
        content_type = "application/x-www-form-urlencoded",
        description = "Form-encoded credentials; multipart and JSON bodies are accepted too"
    ),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Incorrect username or password"),
        (status = 403, description = "Inactive user")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    LoginCredentials(payload): LoginCredentials,
) -> Result<impl IntoResponse> {
    let (user, tokens) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        access_token: tokens.access_token,
        token_type: "bearer".to_string(),
        expires_in: tokens.expires_in,
        refresh_token: tokens.refresh_token,
        user: user.into(),
    }))
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed successfully", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let tokens = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(RefreshTokenResponse {
        access_token: tokens.access_token,
        token_type: "bearer".to_string(),
        expires_in: tokens.expires_in,
        refresh_token: tokens.refresh_token,
    }))
}

/// Logout (revoke refresh token)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Logged out successfully"),
        (status = 400, description = "Invalid input")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    state.auth_service.logout(&payload.refresh_token).await?;
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

/// Currently authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>> {
    let user = state.auth_service.current_user(user.id).await?;
    Ok(Json(user.into()))
}
