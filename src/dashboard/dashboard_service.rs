use std::cmp::Ordering;

use crate::{
    error::{AppError, Result},
    intern::{intern_models::completion_rate, InternRepository},
    task::{task_repository::InternTaskCounts, TaskRepository},
};
use super::dashboard_dto::{DashboardStats, DepartmentStats, TopPerformer};

pub const DEFAULT_TOP_PERFORMERS: usize = 5;
pub const MAX_TOP_PERFORMERS: usize = 50;

#[derive(Clone)]
pub struct DashboardService {
    intern_repo: InternRepository,
    task_repo: TaskRepository,
}

impl DashboardService {
    pub fn new(intern_repo: InternRepository, task_repo: TaskRepository) -> Self {
        Self {
            intern_repo,
            task_repo,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let (total_interns, active_interns) = self.intern_repo.count_by_status().await?;
        let tasks = self.task_repo.status_counts(None).await?;

        Ok(DashboardStats {
            total_interns,
            active_interns,
            pending_tasks: tasks.pending,
            completed_tasks: tasks.completed,
            overdue_tasks: tasks.overdue,
        })
    }

    pub async fn departments(&self) -> Result<Vec<DepartmentStats>> {
        let rows = self.intern_repo.department_counts().await?;

        Ok(rows
            .into_iter()
            .map(|row| DepartmentStats {
                department: row.department,
                intern_count: row.intern_count,
            })
            .collect())
    }

    pub async fn top_performers(&self, limit: Option<usize>) -> Result<Vec<TopPerformer>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_PERFORMERS);
        if !(1..=MAX_TOP_PERFORMERS).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_TOP_PERFORMERS
            )));
        }

        let counts = self.task_repo.counts_per_intern().await?;
        Ok(rank_performers(counts, limit))
    }
}

/// Highest completion rate first, ties broken by completed count then name.
pub fn rank_performers(counts: Vec<InternTaskCounts>, limit: usize) -> Vec<TopPerformer> {
    let mut performers: Vec<TopPerformer> = counts
        .into_iter()
        .filter(|c| c.total > 0)
        .map(|c| TopPerformer {
            completion_rate: completion_rate(c.completed, c.total),
            intern_id: c.intern_id,
            full_name: c.full_name,
            department: c.department,
            total_tasks: c.total,
            completed_tasks: c.completed,
        })
        .collect();

    performers.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(Ordering::Equal)
            .then(b.completed_tasks.cmp(&a.completed_tasks))
            .then_with(|| a.full_name.cmp(&b.full_name))
    });
    performers.truncate(limit);
    performers
}
