use crate::{
    auth::{verify_jwt, TokenType},
    error::AppError,
    state::AppState,
};
use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};

/// Principal carried by a verified access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized("Not authenticated".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or(AppError::Unauthorized("Not authenticated".to_string()))?;

    let claims = verify_jwt(token.trim(), &state.config.jwt_secret, TokenType::Access)?;

    // Claims can outlive the account; the stored row decides.
    let stored = state
        .user_repository
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or(AppError::Unauthorized("User not found".to_string()))?;

    if !stored.is_active {
        return Err(AppError::Forbidden("Inactive user".to_string()));
    }

    let user = AuthUser {
        id: stored.id,
        username: stored.username,
        is_admin: stored.is_admin,
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Rejects requests whose principal is not an active administrator. Must run
/// after `auth_middleware`. The role is re-read so a revoked admin loses
/// access at once.
pub async fn require_admin(
    State(state): State<AppState>,
    user: AuthUser,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let stored = state
        .user_repository
        .find_by_id(user.id)
        .await?
        .ok_or(AppError::Unauthorized("User not found".to_string()))?;

    if !stored.is_active || !stored.is_admin {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized("Not authenticated".to_string()))
    }
}
