use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub username: String,
    pub is_admin: bool,
    pub token_type: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token claims".to_string()))
    }
}

fn create_token(
    user_id: i64,
    username: &str,
    is_admin: bool,
    token_type: TokenType,
    lifetime: Duration,
    secret: &str,
) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(lifetime)
        .ok_or(AppError::InternalError)?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        token_type,
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AppError::Authentication("Failed to create token".to_string()))
}

/// Create a short-lived access token.
pub fn create_access_token(
    user_id: i64,
    username: &str,
    is_admin: bool,
    minutes: i64,
    secret: &str,
) -> Result<String> {
    create_token(
        user_id,
        username,
        is_admin,
        TokenType::Access,
        Duration::minutes(minutes),
        secret,
    )
}

/// Create a long-lived refresh token.
pub fn create_refresh_token(
    user_id: i64,
    username: &str,
    is_admin: bool,
    days: i64,
    secret: &str,
) -> Result<String> {
    create_token(
        user_id,
        username,
        is_admin,
        TokenType::Refresh,
        Duration::days(days),
        secret,
    )
}

/// Verify signature and expiry, and check the token is of the expected kind.
pub fn verify_jwt(token: &str, secret: &str, expected: TokenType) -> Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Could not validate credentials".to_string()))?;

    if claims.token_type != expected {
        return Err(AppError::Unauthorized("Wrong token type".to_string()));
    }

    Ok(claims)
}
