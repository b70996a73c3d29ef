use crate::error::Result;
use sqlx::PgPool;
use super::notification_models::{Notification, NotificationKind, Priority};

/// How many notifications the feed returns.
pub const FEED_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn count_unread(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE is_read = FALSE")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_all_as_read(&self) -> Result<u64> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE is_read = FALSE")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn create(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
        priority: Priority,
    ) -> Result<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (type, title, message, priority)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(kind.as_str())
        .bind(title)
        .bind(message)
        .bind(priority.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }
}
