use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::Result;
use super::{
    intern_dto::{CreateInternRequest, UpdateInternRequest},
    intern_models::{Intern, InternStatus},
};

pub struct InternFilters {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<InternStatus>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: i64,
    pub limit: i64,
}

/// Whitelisted ORDER BY clause for the list endpoint.
pub fn order_clause(sort_by: Option<&str>, sort_order: Option<&str>) -> String {
    let column = match sort_by.unwrap_or("created_at") {
        "full_name" | "name" => "full_name",
        "email" => "email",
        "department" => "department",
        "join_date" => "join_date",
        "status" => "status",
        _ => "created_at",
    };
    let direction = match sort_order.map(str::to_ascii_lowercase).as_deref() {
        Some("asc") => "ASC",
        Some("desc") => "DESC",
        _ if column == "created_at" || column == "join_date" => "DESC",
        _ => "ASC",
    };
    format!(" ORDER BY {} {}, id {}", column, direction, direction)
}

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentCount {
    pub department: String,
    pub intern_count: i64,
}

/// Minimal intern columns needed for analytics aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct InternActivityRow {
    pub id: i64,
    pub department: String,
    #[sqlx(try_from = "String")]
    pub status: InternStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct InternRepository {
    pool: PgPool,
}

impl InternRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, filters: InternFilters) -> Result<(Vec<Intern>, i64)> {
        let mut where_clause = String::from(" WHERE 1=1");
        let mut params_count = 0;

        let search = filters
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));
        let department = filters
            .department
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if search.is_some() {
            params_count += 1;
            where_clause.push_str(&format!(
                " AND (full_name ILIKE ${0} OR email ILIKE ${0})",
                params_count
            ));
        }
        if department.is_some() {
            params_count += 1;
            where_clause.push_str(&format!(" AND department = ${}", params_count));
        }
        if filters.status.is_some() {
            params_count += 1;
            where_clause.push_str(&format!(" AND status = ${}", params_count));
        }

        let count_query = format!("SELECT COUNT(*) FROM interns{}", where_clause);
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_query);

        let list_query = format!(
            "SELECT * FROM interns{}{} LIMIT ${} OFFSET ${}",
            where_clause,
            order_clause(filters.sort_by.as_deref(), filters.sort_order.as_deref()),
            params_count + 1,
            params_count + 2
        );
        let mut list_q = sqlx::query_as::<_, Intern>(&list_query);

        if let Some(ref search) = search {
            count_q = count_q.bind(search);
            list_q = list_q.bind(search);
        }
        if let Some(ref department) = department {
            count_q = count_q.bind(department);
            list_q = list_q.bind(department);
        }
        if let Some(status) = filters.status {
            count_q = count_q.bind(status.as_str());
            list_q = list_q.bind(status.as_str());
        }

        let offset = (filters.page - 1) * filters.limit;
        let total = count_q.fetch_one(&self.pool).await?;
        let interns = list_q
            .bind(filters.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((interns, total))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Intern>> {
        let intern = sqlx::query_as::<_, Intern>("SELECT * FROM interns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(intern)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM interns
                WHERE LOWER(email) = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, req: &CreateInternRequest) -> Result<Intern> {
        let intern = sqlx::query_as::<_, Intern>(
            "INSERT INTO interns (full_name, email, phone, department, position, university, skills)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.department)
        .bind(&req.position)
        .bind(&req.university)
        .bind(&req.skills)
        .fetch_one(&self.pool)
        .await?;

        Ok(intern)
    }

    pub async fn update(&self, id: i64, req: &UpdateInternRequest) -> Result<Option<Intern>> {
        let intern = sqlx::query_as::<_, Intern>(
            "UPDATE interns SET
                full_name = COALESCE($1, full_name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                department = COALESCE($4, department),
                position = CASE WHEN $5::TEXT IS NULL THEN position ELSE NULLIF($5, '') END,
                university = CASE WHEN $6::TEXT IS NULL THEN university ELSE NULLIF($6, '') END,
                skills = COALESCE($7, skills),
                status = COALESCE($8, status),
                updated_at = NOW()
             WHERE id = $9
             RETURNING *",
        )
        .bind(&req.full_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.department)
        .bind(&req.position)
        .bind(&req.university)
        .bind(&req.skills)
        .bind(req.status.map(|s| s.as_str()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(intern)
    }

    pub async fn set_status(&self, id: i64, status: InternStatus) -> Result<Option<Intern>> {
        let intern = sqlx::query_as::<_, Intern>(
            "UPDATE interns SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(intern)
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM interns WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Returns (total, active).
    pub async fn count_by_status(&self) -> Result<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            "SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'active')
             FROM interns",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn department_counts(&self) -> Result<Vec<DepartmentCount>> {
        let rows = sqlx::query_as::<_, DepartmentCount>(
            "SELECT department, COUNT(*) AS intern_count
             FROM interns
             GROUP BY department
             ORDER BY intern_count DESC, department",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn activity_rows(&self) -> Result<Vec<InternActivityRow>> {
        let rows = sqlx::query_as::<_, InternActivityRow>(
            "SELECT id, department, status, created_at, updated_at FROM interns",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
