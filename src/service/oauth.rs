//! IVAO OAuth2 client.
//!
//! Performs the refresh-token grant with a small linear retry policy and fetches the
//! member profile with the resulting access token.

use std::time::Duration;

use oauth2::{
    basic::BasicErrorResponseType, AccessToken, ClientId, ClientSecret, RefreshToken,
    StandardErrorResponse,
};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::{
    config::OAuthConfig,
    error::oauth::OAuthError,
    model::{profile::Profile, token::TokenPair},
};

/// Per-request timeout for token and profile requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Retries after the first failed attempt.
const MAX_RETRIES: u32 = 3;
const RETRY_BASE: Duration = Duration::from_secs(1);

type ErrorBody = StandardErrorResponse<BasicErrorResponseType>;

#[derive(Deserialize)]
struct TokenBody {
    access_token: AccessToken,
    #[serde(default)]
    refresh_token: Option<RefreshToken>,
}

#[derive(Deserialize)]
struct ProfileErrorBody {
    error_description: Option<String>,
}

/// How a single exchange attempt failed.
enum AttemptError {
    Terminal(OAuthError),
    Retryable(String),
    Unexpected(String),
}

/// Client for the IVAO token and profile endpoints.
///
/// Cheap to clone; the underlying `reqwest::Client` is shared.
#[derive(Clone)]
pub struct IvaoOAuthClient {
    http: reqwest::Client,
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: Url,
    profile_url: Url,
    retry_base: Duration,
}

impl IvaoOAuthClient {
    /// Creates a client from OAuth configuration.
    ///
    /// # Returns
    /// - `Ok(IvaoOAuthClient)` - Client ready to use
    /// - `Err(url::ParseError)` - Token or profile URL is invalid
    pub fn new(http: reqwest::Client, config: &OAuthConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            client_id: ClientId::new(config.client_id.clone()),
            client_secret: ClientSecret::new(config.client_secret.clone()),
            token_url: Url::parse(&config.token_url)?,
            profile_url: Url::parse(&config.profile_url)?,
            retry_base: RETRY_BASE,
        })
    }

    /// Overrides the base retry delay.
    pub fn with_retry_base(mut self, retry_base: Duration) -> Self {
        self.retry_base = retry_base;
        self
    }

    /// Exchanges a refresh token for a new token pair.
    ///
    /// Terminal grant errors (`invalid_grant`, `invalid_client`, `unauthorized_client`)
    /// fail after a single request. Other upstream errors, HTTP 5xx and transport
    /// failures are retried up to 3 more times, sleeping `base × attempt` in between.
    /// A malformed success body is not retried.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Exchange succeeded
    /// - `Err(OAuthError::TerminalGrant)` - Stored token is permanently invalid
    /// - `Err(OAuthError::TransientExchange)` - All 4 attempts failed
    /// - `Err(OAuthError::UnexpectedResponse)` - Body could not be interpreted
    pub async fn refresh(&self, refresh_token: &RefreshToken) -> Result<TokenPair, OAuthError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.exchange_once(refresh_token).await {
                Ok(pair) => return Ok(pair),
                Err(AttemptError::Terminal(err)) => return Err(err),
                Err(AttemptError::Unexpected(message)) => {
                    return Err(OAuthError::UnexpectedResponse(message))
                }
                Err(AttemptError::Retryable(message)) => {
                    if attempt > MAX_RETRIES {
                        return Err(OAuthError::TransientExchange {
                            attempts: attempt,
                            message,
                        });
                    }

                    let delay = backoff_delay(self.retry_base, attempt);
                    tracing::debug!(
                        "Token exchange attempt {} failed ({}), retrying in {:?}",
                        attempt,
                        message,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Fetches the profile of the member owning `access_token`.
    ///
    /// # Returns
    /// - `Ok(Profile)` - Profile returned with HTTP 200
    /// - `Err(OAuthError::ProfileFetch)` - Non-200 status or transport failure, carrying
    ///   the upstream `error_description` when present
    /// - `Err(OAuthError::UnexpectedResponse)` - HTTP 200 with an unreadable body
    pub async fn fetch_profile(&self, access_token: &AccessToken) -> Result<Profile, OAuthError> {
        let response = self
            .http
            .get(self.profile_url.clone())
            .bearer_auth(access_token.secret())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| OAuthError::ProfileFetch(format!("Network error: {}", e)))?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .json::<Profile>()
                .await
                .map_err(|e| OAuthError::UnexpectedResponse(format!("Invalid profile: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        let description = serde_json::from_str::<ProfileErrorBody>(&body)
            .ok()
            .and_then(|b| b.error_description)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        Err(OAuthError::ProfileFetch(description))
    }

    async fn exchange_once(&self, refresh_token: &RefreshToken) -> Result<TokenPair, AttemptError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .timeout(REQUEST_TIMEOUT)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.secret().as_str()),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.secret().as_str()),
            ])
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Retryable(format!("Network error: {}", e)))?;

        if status == StatusCode::OK {
            if let Ok(token) = serde_json::from_str::<TokenBody>(&body) {
                return Ok(TokenPair {
                    access_token: token.access_token,
                    refresh_token: token.refresh_token,
                });
            }
        }

        if let Ok(error) = serde_json::from_str::<ErrorBody>(&body) {
            let description = error
                .error_description()
                .cloned()
                .unwrap_or_else(|| "No description".to_string());

            return Err(if is_terminal(error.error()) {
                AttemptError::Terminal(OAuthError::TerminalGrant {
                    error: error.error().clone(),
                    description,
                })
            } else {
                AttemptError::Retryable(format!("{}: {}", error.error(), description))
            });
        }

        if status.is_server_error() {
            return Err(AttemptError::Retryable(format!("HTTP {}", status.as_u16())));
        }

        Err(AttemptError::Unexpected(format!(
            "HTTP {} without access_token or error",
            status.as_u16()
        )))
    }
}

fn is_terminal(error: &BasicErrorResponseType) -> bool {
    matches!(
        error,
        BasicErrorResponseType::InvalidGrant
            | BasicErrorResponseType::InvalidClient
            | BasicErrorResponseType::UnauthorizedClient
    )
}

/// Delay before retry number `retry` (1-based): `base × retry`.
pub fn backoff_delay(base: Duration, retry: u32) -> Duration {
    base * retry
}
