//! Background jobs.
//!
//! - `health_check` - pings the database pool every 5 minutes and recreates it when
//!   the ping fails
//! - `status_report` - optional periodic heartbeat to an external status endpoint

pub mod health_check;
pub mod status_report;

use std::sync::Arc;

use tokio_cron_scheduler::JobScheduler;

use crate::{error::AppError, scheduler::status_report::StatusReporter, state::AppState};

/// Registers every enabled job and starts the scheduler.
///
/// The returned scheduler must be kept alive, and can be shut down on exit.
pub async fn start_scheduler(state: &AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(health_check::job(state.pool.clone())?)
        .await?;

    let report = &state.config.status_report;
    if report.enabled {
        let reporter = Arc::new(StatusReporter::new(
            state.http_client.clone(),
            report.url.clone(),
            state.config.bot_id,
        ));
        scheduler
            .add(status_report::job(reporter, report.interval)?)
            .await?;
        tracing::info!(
            "Status reporting to {} every {}s",
            report.url,
            report.interval.as_secs()
        );
    }

    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(scheduler)
}
