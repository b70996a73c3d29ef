use validator::Validate;

use crate::{
    error::{AppError, Result},
    notification::{NotificationKind, NotificationService, Priority},
    task::TaskRepository,
};
use super::{
    intern_dto::{
        total_pages, CreateInternRequest, InternListQuery, InternsListResponse, UpdateInternRequest,
    },
    intern_models::{Intern, InternStatus, InternWithStats, TaskStats},
    intern_repository::{InternFilters, InternRepository},
    intern_wizard::{validate_step, WizardStep, WizardValidateRequest, WizardValidateResponse},
};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct InternService {
    repo: InternRepository,
    task_repo: TaskRepository,
    notifications: NotificationService,
}

impl InternService {
    pub fn new(
        repo: InternRepository,
        task_repo: TaskRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            repo,
            task_repo,
            notifications,
        }
    }

    pub async fn list_interns(&self, query: InternListQuery) -> Result<InternsListResponse> {
        let page = query.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let (interns, total) = self
            .repo
            .find_all(InternFilters {
                search: query.search,
                department: query.department,
                status: query.status,
                sort_by: query.sort_by,
                sort_order: query.sort_order,
                page,
                limit,
            })
            .await?;

        Ok(InternsListResponse {
            interns,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    pub async fn get_intern(&self, id: i64) -> Result<InternWithStats> {
        let intern = self.find(id).await?;
        let counts = self.task_repo.status_counts(Some(id)).await?;

        Ok(InternWithStats {
            intern,
            task_stats: TaskStats::new(counts.completed, counts.pending, counts.overdue),
        })
    }

    pub async fn create_intern(&self, payload: CreateInternRequest) -> Result<Intern> {
        let payload = payload.normalized();
        payload.validate()?;

        if self.repo.email_exists(&payload.email, None).await? {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let intern = self.repo.create(&payload).await.map_err(duplicate_email)?;
        tracing::info!(intern_id = intern.id, department = %intern.department, "Intern created");

        self.notifications
            .notify(
                NotificationKind::InternCreated,
                "New intern added",
                &format!("{} joined the {} team", intern.full_name, intern.department),
                Priority::Medium,
            )
            .await;

        Ok(intern)
    }

    pub async fn update_intern(&self, id: i64, payload: UpdateInternRequest) -> Result<Intern> {
        let payload = payload.normalized();
        payload.validate()?;

        let existing = self.find(id).await?;

        if let Some(ref email) = payload.email {
            if self.repo.email_exists(email, Some(id)).await? {
                return Err(AppError::BadRequest("Email already registered".to_string()));
            }
        }

        let intern = self
            .repo
            .update(id, &payload)
            .await
            .map_err(duplicate_email)?
            .ok_or_else(|| AppError::NotFound("Intern not found".to_string()))?;

        if intern.status != existing.status {
            self.notify_status_change(&intern).await;
        }

        Ok(intern)
    }

    /// Set the status explicitly, or flip it when `status` is `None`.
    pub async fn set_status(&self, id: i64, status: Option<InternStatus>) -> Result<Intern> {
        let existing = self.find(id).await?;
        let target = status.unwrap_or_else(|| existing.status.toggled());

        if target == existing.status {
            return Ok(existing);
        }

        let intern = self
            .repo
            .set_status(id, target)
            .await?
            .ok_or_else(|| AppError::NotFound("Intern not found".to_string()))?;

        self.notify_status_change(&intern).await;
        Ok(intern)
    }

    pub async fn delete_intern(&self, id: i64) -> Result<()> {
        let intern = self.find(id).await?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::NotFound("Intern not found".to_string()));
        }

        tracing::info!(intern_id = id, "Intern deleted");
        self.notifications
            .notify(
                NotificationKind::InternDeleted,
                "Intern removed",
                &format!("{} was removed along with their tasks", intern.full_name),
                Priority::Low,
            )
            .await;

        Ok(())
    }

    pub async fn validate_wizard_step(
        &self,
        request: WizardValidateRequest,
    ) -> Result<WizardValidateResponse> {
        let mut errors = validate_step(&request.draft, request.step);

        let checks_email = matches!(request.step, WizardStep::Personal | WizardStep::Review);
        if checks_email && !errors.contains_key("email") {
            if let Some(email) = request.draft.email.as_deref().map(str::trim) {
                if self.repo.email_exists(email, request.intern_id).await? {
                    errors.insert("email".to_string(), "Email already registered".to_string());
                }
            }
        }

        Ok(WizardValidateResponse::from_errors(request.step, errors))
    }

    async fn find(&self, id: i64) -> Result<Intern> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Intern not found".to_string()))
    }

    async fn notify_status_change(&self, intern: &Intern) {
        self.notifications
            .notify(
                NotificationKind::InternStatusChanged,
                "Intern status changed",
                &format!("{} is now {}", intern.full_name, intern.status),
                Priority::Low,
            )
            .await;
    }
}

/// A concurrent insert can still hit the unique index after the pre-check.
fn duplicate_email(err: AppError) -> AppError {
    if err.is_unique_violation() {
        AppError::BadRequest("Email already registered".to_string())
    } else {
        err
    }
}
