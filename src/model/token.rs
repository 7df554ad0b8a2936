use oauth2::{AccessToken, RefreshToken};

/// Result of a successful refresh-token grant.
///
/// The access token is used once to fetch the profile and never persisted. The
/// refresh token is absent when the upstream did not rotate it, in which case the
/// stored one stays valid.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: Option<RefreshToken>,
}
