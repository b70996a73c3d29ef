use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct UnknownTaskStatus(pub String);

impl std::str::FromStr for TaskStatus {
    type Err = UnknownTaskStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            _ => Err(UnknownTaskStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = UnknownTaskStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: i64,
    pub intern_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status a task should carry after a write. Completed tasks stay completed;
/// anything else is pending or overdue depending on the deadline.
pub fn effective_status(
    requested: Option<TaskStatus>,
    current: TaskStatus,
    deadline: DateTime<Utc>,
    now: DateTime<Utc>,
) -> TaskStatus {
    match requested.unwrap_or(current) {
        TaskStatus::Completed => TaskStatus::Completed,
        _ if deadline < now => TaskStatus::Overdue,
        _ => TaskStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_task_status_display() {
        assert_eq!(TaskStatus::Pending.to_string(), "pending");
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
        assert_eq!(TaskStatus::Overdue.to_string(), "overdue");
    }

    #[test]
    fn test_task_status_parse() {
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("archived".parse::<TaskStatus>().is_err());
        assert!(TaskStatus::try_from("in_progress".to_string()).is_err());
    }

    #[test]
    fn test_effective_status() {
        let now = Utc::now();
        let past = now - Duration::hours(1);
        let future = now + Duration::hours(1);

        assert_eq!(effective_status(None, TaskStatus::Pending, past, now), TaskStatus::Overdue);
        assert_eq!(effective_status(None, TaskStatus::Pending, future, now), TaskStatus::Pending);
        // Extending the deadline of an overdue task reopens it.
        assert_eq!(effective_status(None, TaskStatus::Overdue, future, now), TaskStatus::Pending);
        assert_eq!(
            effective_status(Some(TaskStatus::Completed), TaskStatus::Overdue, past, now),
            TaskStatus::Completed
        );
        assert_eq!(
            effective_status(Some(TaskStatus::Pending), TaskStatus::Completed, past, now),
            TaskStatus::Overdue
        );
        assert_eq!(effective_status(None, TaskStatus::Completed, past, now), TaskStatus::Completed);
    }
}
