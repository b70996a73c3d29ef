use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use super::task_models::{Task, TaskStatus};

/// Task counts by status, for one intern or for everyone.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct StatusCounts {
    pub pending: i64,
    pub completed: i64,
    pub overdue: i64,
}

/// Per-intern counters joined with the intern's identity.
#[derive(Debug, Clone, FromRow)]
pub struct InternTaskCounts {
    pub intern_id: i64,
    pub full_name: String,
    pub department: String,
    pub total: i64,
    pub completed: i64,
}

/// Minimal task columns needed for analytics aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct TaskActivityRow {
    pub intern_id: i64,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_intern(
        &self,
        intern_id: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>> {
        let mut query = "SELECT * FROM tasks WHERE intern_id = $1".to_string();
        if status.is_some() {
            query.push_str(" AND status = $2");
        }
        query.push_str(" ORDER BY deadline ASC, id ASC");

        let mut db_query = sqlx::query_as::<_, Task>(&query).bind(intern_id);
        if let Some(status) = status {
            db_query = db_query.bind(status.as_str());
        }

        let tasks = db_query.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn create(
        &self,
        intern_id: i64,
        title: &str,
        description: Option<&str>,
        deadline: DateTime<Utc>,
        status: TaskStatus,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (intern_id, title, description, deadline, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(intern_id)
        .bind(title)
        .bind(description)
        .bind(deadline)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        deadline: Option<DateTime<Utc>>,
        status: TaskStatus,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                deadline = COALESCE($3, deadline),
                status = $4,
                updated_at = NOW()
             WHERE id = $5
             RETURNING *",
        )
        .bind(title)
        .bind(description)
        .bind(deadline)
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn status_counts(&self, intern_id: Option<i64>) -> Result<StatusCounts> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'overdue') AS overdue
             FROM tasks
             WHERE $1::BIGINT IS NULL OR intern_id = $1",
        )
        .bind(intern_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn counts_per_intern(&self) -> Result<Vec<InternTaskCounts>> {
        let rows = sqlx::query_as::<_, InternTaskCounts>(
            "SELECT
                i.id AS intern_id,
                i.full_name,
                i.department,
                COUNT(t.id) AS total,
                COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed
             FROM interns i
             JOIN tasks t ON t.intern_id = i.id
             GROUP BY i.id, i.full_name, i.department",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Flip every pending task past its deadline to overdue.
    pub async fn mark_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = 'overdue', updated_at = NOW()
             WHERE status = 'pending' AND deadline < $1
             RETURNING *",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn activity_rows(&self) -> Result<Vec<TaskActivityRow>> {
        let rows = sqlx::query_as::<_, TaskActivityRow>(
            "SELECT intern_id, status, created_at, updated_at FROM tasks",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
