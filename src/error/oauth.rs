use oauth2::basic::BasicErrorResponseType;
use thiserror::Error;

/// Failures talking to the IVAO OAuth2 and profile endpoints.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// The upstream rejected the grant permanently.
    ///
    /// Returned for `invalid_grant`, `invalid_client` and `unauthorized_client`. The
    /// stored refresh token is dead and the member must re-authenticate through the
    /// website; the exchange is never retried.
    #[error("{error}: {description}")]
    TerminalGrant {
        /// OAuth2 error code returned by the upstream
        error: BasicErrorResponseType,
        /// `error_description` from the upstream, or "No description"
        description: String,
    },

    /// Every attempt failed with a retryable error.
    #[error("Token exchange failed after {attempts} attempts: {message}")]
    TransientExchange {
        /// Total number of requests sent, including the first one
        attempts: u32,
        /// Error from the final attempt
        message: String,
    },

    /// The upstream answered but the body could not be interpreted.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Profile request did not return HTTP 200.
    #[error("Failed to get user info: {0}")]
    ProfileFetch(String),
}

impl OAuthError {
    /// Whether the error can only be fixed by the member re-authenticating.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::TerminalGrant { .. })
    }
}
