use tokio_cron_scheduler::{Job, JobSchedulerError};

use crate::data::pool::DatabasePool;

/// Every 5 minutes, on the minute.
const SCHEDULE: &str = "0 */5 * * * *";

/// Builds the database health check job.
pub fn job(pool: DatabasePool) -> Result<Job, JobSchedulerError> {
    Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let pool = pool.clone();

        Box::pin(async move {
            if pool.ping_pool().await {
                tracing::debug!("Database health check passed");
            } else {
                tracing::error!("Database health check failed; pool unavailable");
            }
        })
    })
}
