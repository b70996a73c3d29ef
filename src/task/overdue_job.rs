use crate::state::AppState;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

/// Schedule the overdue sweep on `Config::overdue_sweep_cron`. The returned
/// scheduler must be kept alive for the jobs to keep firing.
pub async fn start_overdue_job(
    state: AppState,
) -> Result<JobScheduler, Box<dyn std::error::Error + Send + Sync>> {
    let scheduler = JobScheduler::new().await?;
    let cron = state.config.overdue_sweep_cron.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _l| {
        let state = state.clone();

        Box::pin(async move {
            run_sweep(&state).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    info!(%cron, "Overdue task sweep scheduled");
    Ok(scheduler)
}

async fn run_sweep(state: &AppState) {
    match state.task_service.sweep_overdue().await {
        Ok(0) => {}
        Ok(flipped) => info!(flipped, "Marked tasks as overdue"),
        Err(e) => error!("Error sweeping overdue tasks: {:?}", e),
    }

    match state.auth_service.purge_expired_tokens().await {
        Ok(0) => {}
        Ok(purged) => info!(purged, "Purged expired refresh tokens"),
        Err(e) => error!("Error purging refresh tokens: {:?}", e),
    }
}
