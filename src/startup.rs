use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    data::pool::DatabasePool,
    error::{config::ConfigError, store::StoreError, AppError},
    service::{oauth::IvaoOAuthClient, token::TokenService},
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the configured `LOG_LEVEL` applies to this
/// crate and `warn` to everything else.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,ivao_auth_bot={}", config.log_level))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connects the database pool, runs pending migrations and checks liveness.
///
/// # Arguments
/// - `config` - Application configuration containing the database settings
///
/// # Returns
/// - `Ok(DatabasePool)` - Pool created and the first ping succeeded
/// - `Err(AppError)` - Failed to connect, migrate, or ping
pub async fn connect_to_database(config: &Config) -> Result<DatabasePool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;

    if !pool.check_connection().await {
        pool.close().await;
        return Err(StoreError::Unavailable.into());
    }

    Ok(pool)
}

/// Creates the shared HTTP client with a 10 second request timeout.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Creates the IVAO OAuth client and the token rotation service around it.
pub fn setup_token_service(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<TokenService, AppError> {
    let oauth = IvaoOAuthClient::new(http_client, &config.oauth).map_err(|e| {
        ConfigError::InvalidValue {
            name: "OAuth endpoint".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(TokenService::new(oauth))
}
