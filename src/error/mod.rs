//! Error types for the bot.
//!
//! Each concern owns a `thiserror` enum. `AppError` aggregates the ones that can abort
//! startup or a background job; per-member failures stay in their own enums so they
//! can be reported back to Discord users as structured results.

pub mod config;
pub mod internal;
pub mod member;
pub mod oauth;
pub mod store;
pub mod token;
pub mod verification;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError, store::StoreError};

/// Top-level application error type.
///
/// Returned by startup, the scheduler and the Discord client runner. Most variants use
/// `#[from]` for automatic conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// The process exits with a non-zero code when this reaches `main`.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Connection pool is not available.
    #[error(transparent)]
    StoreErr(#[from] StoreError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal issue such as corrupt stored ids.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
