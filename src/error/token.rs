use sea_orm::DbErr;
use thiserror::Error;

use crate::error::{oauth::OAuthError, store::StoreError};

/// Failures of a guarded refresh-token rotation.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Database(#[from] DbErr),

    /// The identity has no stored refresh token, or only a blank one.
    #[error("No refresh token found for {identity}. User needs to re-authenticate.")]
    MissingRefreshToken {
        /// Rendered identity key, e.g. `user 1234` or `VID 654321`
        identity: String,
    },

    #[error(transparent)]
    OAuth(#[from] OAuthError),
}
