use sea_orm::DbErr;
use thiserror::Error;

use crate::error::{
    internal::InternalError, oauth::OAuthError, store::StoreError, token::TokenError,
};

/// Terminal failure of a member verification.
///
/// Each variant maps to a stable numeric code through [`VerificationError::code`] which
/// is what gets logged for automatic verifications and what callers branch on.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Database pool not available")]
    StoreUnavailable,

    #[error("Unexpected error: {0}")]
    Database(#[from] DbErr),

    #[error("Unexpected error: {0}")]
    Internal(#[from] InternalError),

    /// No record matched the member by id or by any display-name fallback.
    #[error("User not found in database. Could not match Discord ID {discord_id}, username, display name or VID.")]
    IdentityNotFound {
        /// Discord id of the member being verified
        discord_id: u64,
    },

    #[error("User is banned")]
    UserBanned,

    /// A record was found but holds no usable refresh token.
    #[error("User found in database but no refresh token available. User needs to re-authenticate.")]
    ReauthenticationRequired {
        /// Internal id of the matched record
        record_id: i32,
    },

    #[error(transparent)]
    OAuth(#[from] OAuthError),
}

impl VerificationError {
    /// Stable numeric code for the failure.
    ///
    /// - `1` unexpected failure (store, database, internal)
    /// - `2` identity not found, or found without a refresh token
    /// - `3` banned
    /// - `4` OAuth failure
    pub fn code(&self) -> u8 {
        match self {
            Self::StoreUnavailable | Self::Database(_) | Self::Internal(_) => 1,
            Self::IdentityNotFound { .. } | Self::ReauthenticationRequired { .. } => 2,
            Self::UserBanned => 3,
            Self::OAuth(_) => 4,
        }
    }
}

impl From<StoreError> for VerificationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => Self::StoreUnavailable,
        }
    }
}

impl VerificationError {
    /// Converts a guarded rotation failure for the record `record_id`.
    ///
    /// The stored token vanishing between lookup and exchange is reported the same way
    /// as a record that never had one.
    pub fn from_token_error(err: TokenError, record_id: i32) -> Self {
        match err {
            TokenError::Store(err) => err.into(),
            TokenError::Database(err) => err.into(),
            TokenError::MissingRefreshToken { .. } => Self::ReauthenticationRequired { record_id },
            TokenError::OAuth(err) => err.into(),
        }
    }
}
