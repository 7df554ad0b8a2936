//! Heartbeat to an external status endpoint.
//!
//! POSTs `<url>?bot_discord_id=<bot id>` on a fixed interval. Only the first failure
//! after a success is logged; the endpoint being down for hours does not flood the
//! log.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio_cron_scheduler::{Job, JobSchedulerError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct StatusReporter {
    http: reqwest::Client,
    url: String,
    bot_id: u64,
    failing: AtomicBool,
}

impl StatusReporter {
    pub fn new(http: reqwest::Client, url: String, bot_id: u64) -> Self {
        Self {
            http,
            url,
            bot_id,
            failing: AtomicBool::new(false),
        }
    }

    /// Sends one heartbeat.
    ///
    /// # Returns
    /// - `true` - The endpoint answered with a success status
    /// - `false` - Transport failure, timeout, or non-success status
    pub async fn report(&self) -> bool {
        let result = self
            .http
            .post(&self.url)
            .query(&[("bot_discord_id", self.bot_id)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                if self.failing.swap(false, Ordering::Relaxed) {
                    tracing::info!("Status report to {} recovered", self.url);
                }
                true
            }
            Err(e) => {
                if !self.failing.swap(true, Ordering::Relaxed) {
                    tracing::warn!("Status report to {} failed: {}", self.url, e);
                }
                false
            }
        }
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::Relaxed)
    }
}

/// Builds the repeating status report job.
pub fn job(reporter: Arc<StatusReporter>, interval: Duration) -> Result<Job, JobSchedulerError> {
    Job::new_repeated_async(interval, move |_uuid, _lock| {
        let reporter = reporter.clone();

        Box::pin(async move {
            reporter.report().await;
        })
    })
}
