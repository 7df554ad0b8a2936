//! Application state shared by the Discord handler and the scheduler.
//!
//! Built once during startup and cloned into every consumer. There is no global
//! settings or pool instance; everything reaches its dependencies through here.

use std::sync::Arc;

use crate::{config::Config, data::pool::DatabasePool, service::token::TokenService};

/// Shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabasePool` shares its inner connection pool through an `Arc`
/// - `TokenService` shares its rotation guards through an `Arc`
/// - `reqwest::Client` uses an `Arc` internally
#[derive(Clone)]
pub struct AppState {
    pub pool: DatabasePool,

    /// IVAO client plus per-identity rotation guards.
    pub tokens: TokenService,

    pub config: Arc<Config>,

    /// HTTP client for outbound requests other than the IVAO API, such as the
    /// status report.
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `pool` - Database connection pool
    /// - `tokens` - Token rotation service
    /// - `config` - Validated configuration
    /// - `http_client` - Shared HTTP client
    pub fn new(
        pool: DatabasePool,
        tokens: TokenService,
        config: Arc<Config>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            pool,
            tokens,
            config,
            http_client,
        }
    }
}
