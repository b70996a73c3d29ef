use chrono::Utc;

use crate::{error::Result, intern::InternRepository, task::TaskRepository};
use super::{
    aggregate::build_analytics,
    analytics_dto::{AnalyticsData, TimeRange},
};

#[derive(Clone)]
pub struct AnalyticsService {
    intern_repo: InternRepository,
    task_repo: TaskRepository,
}

impl AnalyticsService {
    pub fn new(intern_repo: InternRepository, task_repo: TaskRepository) -> Self {
        Self {
            intern_repo,
            task_repo,
        }
    }

    pub async fn analytics(&self, range: TimeRange) -> Result<AnalyticsData> {
        let interns = self.intern_repo.activity_rows().await?;
        let tasks = self.task_repo.activity_rows().await?;

        tracing::debug!(
            interns = interns.len(),
            tasks = tasks.len(),
            days = range.days(),
            "Building analytics"
        );

        Ok(build_analytics(&interns, &tasks, Utc::now()))
    }
}
