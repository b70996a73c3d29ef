use std::sync::Arc;

use crate::auth::auth_repository::RefreshTokenRepository;
use crate::auth::jwt::TokenType;
use crate::auth::{create_access_token, create_refresh_token, hash_password, verify_jwt, verify_password};
use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::state::Config;
use crate::user::user_models::{NewUser, User};
use crate::user::user_repository::UserRepository;
use chrono::{Duration, Utc};

/// Access and refresh tokens issued together.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    user_repo: UserRepository,
    refresh_token_repo: RefreshTokenRepository,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(
        db: DbPool,
        user_repo: UserRepository,
        refresh_token_repo: RefreshTokenRepository,
        config: Arc<Config>,
    ) -> Self {
        Self {
            db,
            user_repo,
            refresh_token_repo,
            config,
        }
    }

    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<(User, TokenPair)> {
        let user = self
            .user_repo
            .find_by_username_or_email(username_or_email.trim())
            .await?
            .ok_or_else(|| AppError::Authentication("Incorrect username or password".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Incorrect username or password".into()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Inactive user".into()));
        }

        let tokens = self.issue_tokens(&user).await?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, tokens))
    }

    /// Exchange a refresh token for a new pair; the presented token is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = verify_jwt(refresh_token, &self.config.jwt_secret, TokenType::Refresh)?;
        let user_id = claims.user_id()?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".into()))?;

        if !user.is_active {
            return Err(AppError::Forbidden("Inactive user".into()));
        }

        // Deleting the presented token is the lookup; a replayed or
        // concurrently used token finds nothing.
        let mut tx = self.db.begin().await?;
        self.refresh_token_repo
            .take_with_tx(&mut tx, refresh_token)
            .await?
            .filter(|stored| stored.user_id == user.id)
            .ok_or_else(|| AppError::Authentication("Invalid refresh token".into()))?;

        let tokens = self.mint_tokens(&user)?;
        self.store_refresh_token(&mut tx, &user, &tokens).await?;
        tx.commit().await?;

        Ok(tokens)
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let removed = self.refresh_token_repo.delete_by_token(refresh_token).await?;
        tracing::debug!(removed, "Refresh token revoked");
        Ok(())
    }

    pub async fn current_user(&self, user_id: i64) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))
    }

    /// Create the configured bootstrap administrator when it does not exist yet.
    pub async fn ensure_admin(&self) -> Result<Option<User>> {
        let Some(password) = self.config.admin_password.as_deref() else {
            return Ok(None);
        };

        if self
            .user_repo
            .find_by_username_or_email(&self.config.admin_username)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_repo
            .create(NewUser {
                username: &self.config.admin_username,
                email: &self.config.admin_email,
                password_hash: &password_hash,
                full_name: Some("System Administrator"),
                is_admin: true,
            })
            .await?;

        tracing::info!(username = %user.username, "Bootstrap admin user created");
        Ok(Some(user))
    }

    pub async fn purge_expired_tokens(&self) -> Result<u64> {
        self.refresh_token_repo.delete_expired().await
    }

    async fn issue_tokens(&self, user: &User) -> Result<TokenPair> {
        let tokens = self.mint_tokens(user)?;
        let mut tx = self.db.begin().await?;
        self.store_refresh_token(&mut tx, user, &tokens).await?;
        tx.commit().await?;
        Ok(tokens)
    }

    fn mint_tokens(&self, user: &User) -> Result<TokenPair> {
        let access_token = create_access_token(
            user.id,
            &user.username,
            user.is_admin,
            self.config.access_token_expire_minutes,
            &self.config.jwt_secret,
        )?;
        let refresh_token = create_refresh_token(
            user.id,
            &user.username,
            user.is_admin,
            self.config.refresh_token_expire_days,
            &self.config.jwt_secret,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.config.access_token_expire_minutes * 60,
        })
    }

    async fn store_refresh_token(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: &User,
        tokens: &TokenPair,
    ) -> Result<()> {
        let expires_at = Utc::now() + Duration::days(self.config.refresh_token_expire_days);
        self.refresh_token_repo
            .create_with_tx(tx, user.id, &tokens.refresh_token, expires_at)
            .await?;
        Ok(())
    }
}
