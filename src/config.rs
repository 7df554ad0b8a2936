//! Environment-sourced configuration.
//!
//! Every value is read once at startup into typed sections. `Config::from_lookup`
//! performs the parsing over an arbitrary key lookup so tests never touch the process
//! environment.

use std::{num::NonZeroU64, time::Duration};

use crate::error::config::ConfigError;

const IVAO_TOKEN_URL: &str = "https://api.ivao.aero/v2/oauth/token";
const IVAO_PROFILE_URL: &str = "https://api.ivao.aero/v2/users/me";

const DEFAULT_STATUS_REPORT_URL: &str = "http://localhost:8080/status_report";

pub struct Config {
    /// Token the Discord client logs in with (`DEBUG_TOKEN` when `BOT_DEBUG` is set).
    pub discord_token: String,
    /// Bot application id, reported to the status endpoint.
    pub bot_id: u64,
    pub log_level: String,

    pub oauth: OAuthConfig,
    pub database: DatabaseConfig,
    pub division: DivisionConfig,
    pub status_report: StatusReportConfig,
}

#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub profile_url: String,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    /// Maximum lifetime of a pooled connection before it is recycled.
    pub max_lifetime: Duration,
}

/// Home division and the guild roles granted by verification.
#[derive(Clone, Debug)]
pub struct DivisionConfig {
    /// Home division id, e.g. `XM`. Staff position codes are prefixed with it.
    pub division: String,
    pub country: String,
    pub roles: DivisionRoles,
}

/// The 13 role ids the bot grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DivisionRoles {
    pub staff: u64,
    pub hq: u64,
    pub specops: u64,
    pub flightops: u64,
    pub atcops: u64,
    pub training: u64,
    pub web: u64,
    pub membership: u64,
    pub event: u64,
    pub pr: u64,
    pub vid_verified: u64,
    pub div_member: u64,
    pub non_div_member: u64,
}

#[derive(Clone)]
pub struct StatusReportConfig {
    pub enabled: bool,
    pub url: String,
    pub interval: Duration,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// `.env` is expected to have been loaded by `dotenvy` beforehand.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError)` - A variable is missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parses configuration from any key lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value for a variable name, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidValue)` - A variable failed to parse or is out of range
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let discord_token = if env.flag("BOT_DEBUG")? {
            env.required("DEBUG_TOKEN")?
        } else {
            env.required("DISCORD_TOKEN")?
        };

        let min_connections = env.bounded_u32("DB_POOL_MIN_SIZE", 1, 1)?;
        let max_connections = env.bounded_u32("DB_POOL_MAX_SIZE", 10, 1)?;
        if max_connections < min_connections {
            return Err(ConfigError::InvalidValue {
                name: "DB_POOL_MAX_SIZE".to_string(),
                reason: format!(
                    "must be greater than or equal to DB_POOL_MIN_SIZE ({})",
                    min_connections
                ),
            });
        }

        Ok(Self {
            discord_token,
            bot_id: env.required_id("BOT_ID")?,
            log_level: env.optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            oauth: OAuthConfig {
                client_id: env.required("OAUTH_CLIENT_ID")?,
                client_secret: env.required("OAUTH_CLIENT_SECRET")?,
                token_url: IVAO_TOKEN_URL.to_string(),
                profile_url: IVAO_PROFILE_URL.to_string(),
            },
            database: DatabaseConfig {
                url: env.required("DATABASE_URL")?,
                min_connections,
                max_connections,
                max_lifetime: Duration::from_secs(
                    env.bounded_u32("DB_POOL_RECYCLE", 3600, 60)?.into(),
                ),
            },
            division: DivisionConfig {
                division: env.required("DIV")?,
                country: env.required("COUNTRY")?,
                roles: DivisionRoles {
                    staff: env.required_id("DIV_STAFF")?,
                    hq: env.required_id("DIV_HQ")?,
                    specops: env.required_id("SPECOPS")?,
                    flightops: env.required_id("FLIGHTOPS")?,
                    atcops: env.required_id("ATCOPS")?,
                    training: env.required_id("TRAINING")?,
                    web: env.required_id("WEB")?,
                    membership: env.required_id("MEMBERSHIP")?,
                    event: env.required_id("EVENT")?,
                    pr: env.required_id("PR")?,
                    vid_verified: env.required_id("VID_VERIFIED")?,
                    div_member: env.required_id("DIV_MEMBER")?,
                    non_div_member: env.required_id("NON_DIV_IVAO_MEMBER")?,
                },
            },
            status_report: StatusReportConfig {
                enabled: env.flag("ENABLE_STATUS_REPORT")?,
                url: env
                    .optional("STATUS_REPORT_URL")
                    .unwrap_or_else(|| DEFAULT_STATUS_REPORT_URL.to_string()),
                interval: Duration::from_secs(
                    env.bounded_u32("STATUS_REPORT_INTERVAL", 120, 10)?.into(),
                ),
            },
        })
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    /// Discord snowflake; zero is rejected since no Discord object can carry it.
    fn required_id(&self, name: &str) -> Result<u64, ConfigError> {
        let value = self.required(name)?;
        value
            .parse::<NonZeroU64>()
            .map(NonZeroU64::get)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: format!("'{}' is not a valid non-zero Discord id", value),
            })
    }

    fn bounded_u32(&self, name: &str, default: u32, min: u32) -> Result<u32, ConfigError> {
        let Some(value) = self.optional(name) else {
            return Ok(default);
        };

        let parsed = value.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!("'{}' is not a valid unsigned integer", value),
        })?;

        if parsed < min {
            return Err(ConfigError::InvalidValue {
                name: name.to_string(),
                reason: format!("must be at least {}", min),
            });
        }

        Ok(parsed)
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        let Some(value) = self.optional(name) else {
            return Ok(false);
        };

        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: name.to_string(),
                reason: format!("'{}' is not a boolean", value),
            }),
        }
    }
}
