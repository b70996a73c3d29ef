use crate::error::Result;
use sqlx::PgPool;
use super::user_models::{NewUser, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_user: NewUser<'_>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, full_name, is_admin)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.full_name)
        .bind(new_user.is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE username = $1 OR LOWER(email) = LOWER($1) LIMIT 1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Returns true when another account already uses the username or email.
    pub async fn is_taken(
        &self,
        exclude_id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM users
                WHERE id <> $1
                  AND (username = $2 OR LOWER(email) = LOWER($3))
             )",
        )
        .bind(exclude_id)
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    pub async fn update_profile(
        &self,
        user_id: i64,
        username: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        department: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET
                username = COALESCE($1, username),
                email = COALESCE($2, email),
                phone = CASE WHEN $3::TEXT IS NULL THEN phone ELSE NULLIF($3, '') END,
                department = CASE WHEN $4::TEXT IS NULL THEN department ELSE NULLIF($4, '') END,
                full_name = CASE WHEN $5::TEXT IS NULL THEN full_name ELSE NULLIF($5, '') END,
                updated_at = NOW()
             WHERE id = $6
             RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(phone)
        .bind(department)
        .bind(full_name)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn set_avatar(&self, user_id: i64, avatar_url: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET avatar_url = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(avatar_url)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
