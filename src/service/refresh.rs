//! Bulk refresh-token rotation.
//!
//! Snapshots the selected identity records once, then rotates their tokens one at a
//! time with a fixed delay between records. Per-record failures are collected into
//! the summary instead of aborting the batch.

use std::time::Duration;

use chrono::Utc;
use serenity::async_trait;

use crate::{
    data::{identity::IdentityRepository, pool::DatabasePool},
    error::AppError,
    model::{
        identity::{IdentityKey, IdentityRecord},
        refresh::{RefreshFailure, RefreshProgress, RefreshSelector, RefreshSummary},
    },
    service::{token::TokenService, verification::resolve_identity},
    util::parse::parse_u64_from_string,
};

/// Delay between two records of a batch.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(500);

/// Progress is reported every this many records and once more at completion.
const PROGRESS_EVERY: usize = 10;

const NO_REFRESH_TOKEN: &str = "No refresh token found. User needs to re-authenticate.";
const NO_IDENTITY_KEY: &str = "User has no Discord ID or VID";

/// Receives incremental progress of a running batch.
#[async_trait]
pub trait RefreshReporter: Send + Sync {
    async fn progress(&self, progress: RefreshProgress);
}

pub struct RefreshService<'a> {
    pool: &'a DatabasePool,
    tokens: &'a TokenService,
    throttle: Duration,
}

impl<'a> RefreshService<'a> {
    /// Creates a new RefreshService instance with the default throttle.
    pub fn new(pool: &'a DatabasePool, tokens: &'a TokenService) -> Self {
        Self {
            pool,
            tokens,
            throttle: DEFAULT_THROTTLE,
        }
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Rotates the refresh token of every record matching `selector`.
    ///
    /// # Arguments
    /// - `selector` - Which records to cover; evaluated once before processing starts
    /// - `reporter` - Receives progress every 10 records and at completion
    ///
    /// # Returns
    /// - `Ok(RefreshSummary)` - Batch completed, possibly with per-record failures.
    ///   `total == 0` when nothing matched.
    /// - `Err(AppError)` - The pool is unavailable or the selection query failed
    pub async fn run(
        &self,
        selector: &RefreshSelector,
        reporter: &dyn RefreshReporter,
    ) -> Result<RefreshSummary, AppError> {
        let db = self.pool.connection().await?;
        let records = self.snapshot(&db, selector).await?;

        let mut summary = RefreshSummary {
            total: records.len(),
            ..Default::default()
        };

        tracing::info!("Refreshing tokens for {} record(s)", summary.total);

        for (index, record) in records.iter().enumerate() {
            let processed = index + 1;

            match self.refresh_record(&db, record).await {
                Ok(()) => summary.successful += 1,
                Err(failure) => {
                    tracing::warn!("Token refresh failed: {}", failure);
                    summary.failed += 1;
                    summary.errors.push(failure);
                }
            }

            if processed % PROGRESS_EVERY == 0 || processed == summary.total {
                reporter
                    .progress(RefreshProgress {
                        processed,
                        total: summary.total,
                        successful: summary.successful,
                        failed: summary.failed,
                    })
                    .await;
            }

            if summary.total > 1 && processed < summary.total && !self.throttle.is_zero() {
                tokio::time::sleep(self.throttle).await;
            }
        }

        tracing::info!(
            "Token refresh completed: {} successful, {} failed, {} total",
            summary.successful,
            summary.failed,
            summary.total
        );

        Ok(summary)
    }

    async fn snapshot(
        &self,
        db: &sea_orm::DatabaseConnection,
        selector: &RefreshSelector,
    ) -> Result<Vec<IdentityRecord>, AppError> {
        let repo = IdentityRepository::new(db);

        let records = match selector {
            RefreshSelector::Member(member) => resolve_identity(db, member)
                .await?
                .map(|(record, _)| vec![record])
                .unwrap_or_default(),
            RefreshSelector::OlderThan(days) => {
                let cutoff = Utc::now() - chrono::Duration::days(i64::from(*days));
                repo.find_with_refresh_token_older_than(cutoff).await?
            }
            RefreshSelector::All => repo.find_all_with_refresh_token().await?,
        };

        Ok(records)
    }

    async fn refresh_record(
        &self,
        db: &sea_orm::DatabaseConnection,
        record: &IdentityRecord,
    ) -> Result<(), RefreshFailure> {
        let failure = |identifier: String, message: String| RefreshFailure {
            identifier,
            message,
        };

        if record.refresh_token.is_none() {
            return Err(failure(record.identifier(), NO_REFRESH_TOKEN.to_string()));
        }

        let key = match (&record.discord_user_id, &record.vid) {
            (Some(discord_id), _) => parse_u64_from_string(discord_id.clone())
                .map(IdentityKey::DiscordId)
                .map_err(|e| failure(record.identifier(), e.to_string()))?,
            (None, Some(vid)) => IdentityKey::Vid(vid.clone()),
            (None, None) => return Err(failure(String::new(), NO_IDENTITY_KEY.to_string())),
        };

        self.tokens
            .refresh_identity(db, &key)
            .await
            .map(|_| ())
            .map_err(|e| failure(record.identifier(), e.to_string()))
    }
}
