use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    intern::InternRepository,
    notification::{NotificationKind, NotificationService, Priority},
};
use super::{
    task_dto::{CreateTaskRequest, UpdateTaskRequest},
    task_models::{effective_status, Task, TaskStatus},
    task_repository::TaskRepository,
};

/// Service layer for task-related business logic.
#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    intern_repo: InternRepository,
    notifications: NotificationService,
}

impl TaskService {
    pub fn new(
        repo: TaskRepository,
        intern_repo: InternRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            intern_repo,
            notifications,
        }
    }

    pub async fn list_for_intern(
        &self,
        intern_id: i64,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>> {
        self.intern_repo
            .find_by_id(intern_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Intern not found".into()))?;

        self.repo.find_by_intern(intern_id, status).await
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Task> {
        self.repo
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn create_task(&self, payload: CreateTaskRequest) -> Result<Task> {
        payload.validate()?;

        let intern = self
            .intern_repo
            .find_by_id(payload.intern_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Intern not found".into()))?;

        let status = effective_status(None, TaskStatus::Pending, payload.deadline, Utc::now());
        let description = payload
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let task = self
            .repo
            .create(
                intern.id,
                payload.title.trim(),
                description,
                payload.deadline,
                status,
            )
            .await?;

        tracing::info!(task_id = task.id, intern_id = intern.id, "Task assigned");
        self.notifications
            .notify(
                NotificationKind::TaskAssigned,
                "New task assigned",
                &format!("\"{}\" was assigned to {}", task.title, intern.full_name),
                Priority::Medium,
            )
            .await;

        Ok(task)
    }

    pub async fn update_task(&self, task_id: i64, payload: UpdateTaskRequest) -> Result<Task> {
        payload.validate()?;

        let existing = self.get_task(task_id).await?;
        let deadline = payload.deadline.unwrap_or(existing.deadline);
        let status = effective_status(payload.status, existing.status, deadline, Utc::now());

        let task = self
            .repo
            .update(
                task_id,
                payload.title.as_deref().map(str::trim),
                payload.description.as_deref(),
                payload.deadline,
                status,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        if existing.status != TaskStatus::Completed && task.status == TaskStatus::Completed {
            self.notify_completed(&task).await;
        }

        Ok(task)
    }

    pub async fn complete_task(&self, task_id: i64) -> Result<Task> {
        self.update_task(
            task_id,
            UpdateTaskRequest {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        if self.repo.delete(task_id).await? == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    /// Flip late pending tasks to overdue and announce each one.
    pub async fn sweep_overdue(&self) -> Result<usize> {
        let tasks = self.repo.mark_overdue(Utc::now()).await?;

        for task in &tasks {
            self.notifications
                .notify(
                    NotificationKind::TaskOverdue,
                    "Task overdue",
                    &format!("\"{}\" passed its deadline", task.title),
                    Priority::High,
                )
                .await;
        }

        Ok(tasks.len())
    }

    async fn notify_completed(&self, task: &Task) {
        let owner = match self.intern_repo.find_by_id(task.intern_id).await {
            Ok(Some(intern)) => intern.full_name,
            _ => format!("intern #{}", task.intern_id),
        };

        self.notifications
            .notify(
                NotificationKind::TaskCompleted,
                "Task completed",
                &format!("{} completed \"{}\"", owner, task.title),
                Priority::Low,
            )
            .await;
    }
}
