use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown notification priority: {0}")]
pub struct UnknownPriority(pub String);

impl TryFrom<String> for Priority {
    type Error = UnknownPriority;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(UnknownPriority(value)),
        }
    }
}

/// Event that produced a notification; stored in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    InternCreated,
    InternStatusChanged,
    InternDeleted,
    TaskAssigned,
    TaskCompleted,
    TaskOverdue,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::InternCreated => "intern_created",
            NotificationKind::InternStatusChanged => "intern_status_changed",
            NotificationKind::InternDeleted => "intern_deleted",
            NotificationKind::TaskAssigned => "task_assigned",
            NotificationKind::TaskCompleted => "task_completed",
            NotificationKind::TaskOverdue => "task_overdue",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_fit_column() {
        for kind in [
            NotificationKind::InternCreated,
            NotificationKind::InternStatusChanged,
            NotificationKind::InternDeleted,
            NotificationKind::TaskAssigned,
            NotificationKind::TaskCompleted,
            NotificationKind::TaskOverdue,
        ] {
            assert!(kind.as_str().len() <= 30, "{} too long", kind.as_str());
        }
    }

    #[test]
    fn test_notification_serializes_type_field() {
        let notification = Notification {
            id: 1,
            kind: NotificationKind::TaskOverdue.as_str().to_string(),
            title: "Task overdue".into(),
            message: "API Documentation is past its deadline".into(),
            is_read: false,
            priority: Priority::High,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["type"], "task_overdue");
        assert_eq!(json["priority"], "high");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(Priority::try_from("medium".to_string()).unwrap(), Priority::Medium);
        assert!(Priority::try_from("urgent".to_string()).is_err());
    }
}
