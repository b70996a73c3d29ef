use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InternStatus {
    Active,
    Inactive,
}

impl InternStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternStatus::Active => "active",
            InternStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            InternStatus::Active => InternStatus::Inactive,
            InternStatus::Inactive => InternStatus::Active,
        }
    }
}

impl std::fmt::Display for InternStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown intern status: {0}")]
pub struct UnknownInternStatus(pub String);

impl std::str::FromStr for InternStatus {
    type Err = UnknownInternStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(InternStatus::Active),
            "inactive" => Ok(InternStatus::Inactive),
            _ => Err(UnknownInternStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for InternStatus {
    type Error = UnknownInternStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Intern {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: Option<String>,
    pub university: Option<String>,
    pub skills: Vec<String>,
    pub join_date: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: InternStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-intern task counters shown on the detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TaskStats {
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub overdue_tasks: i64,
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn new(completed_tasks: i64, pending_tasks: i64, overdue_tasks: i64) -> Self {
        let total_tasks = completed_tasks + pending_tasks + overdue_tasks;
        Self {
            total_tasks,
            completed_tasks,
            pending_tasks,
            overdue_tasks,
            completion_rate: completion_rate(completed_tasks, total_tasks),
        }
    }
}

/// Percentage of completed tasks, rounded to one decimal; 0 when there are none.
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round1(completed as f64 / total as f64 * 100.0)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InternWithStats {
    #[serde(flatten)]
    pub intern: Intern,
    pub task_stats: TaskStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_status_display_and_parse() {
        assert_eq!(InternStatus::Active.to_string(), "active");
        assert_eq!(InternStatus::Inactive.to_string(), "inactive");
        assert_eq!("ACTIVE".parse::<InternStatus>().unwrap(), InternStatus::Active);
        assert!("paused".parse::<InternStatus>().is_err());
    }

    #[test]
    fn test_intern_status_toggle() {
        assert_eq!(InternStatus::Active.toggled(), InternStatus::Inactive);
        assert_eq!(InternStatus::Inactive.toggled(), InternStatus::Active);
    }

    #[test]
    fn test_task_stats_without_tasks() {
        let stats = TaskStats::new(0, 0, 0);
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_task_stats_completion_rate_rounds_to_one_decimal() {
        let stats = TaskStats::new(1, 1, 1);
        assert_eq!(stats.total_tasks, 3);
        assert_eq!(stats.completion_rate, 33.3);

        assert_eq!(TaskStats::new(2, 1, 0).completion_rate, 66.7);
        assert_eq!(TaskStats::new(4, 0, 0).completion_rate, 100.0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InternStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }
}
