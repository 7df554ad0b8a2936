//! Guarded refresh-token rotation.
//!
//! Two verifications of the same identity running at once would otherwise both read
//! the same stored refresh token, and the second exchange would fail against a token
//! the first one already rotated. Rotations are serialised per record and the stored
//! token is re-read once the guard is held.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;

use crate::{
    data::identity::IdentityRepository,
    error::token::TokenError,
    model::{identity::IdentityKey, token::TokenPair},
    service::oauth::IvaoOAuthClient,
};

/// Per-record mutex serialising token rotation, keyed by internal record id.
pub type RotationLocks = Arc<DashMap<i32, Arc<Mutex<()>>>>;

/// Exchanges stored refresh tokens and persists the rotated ones.
#[derive(Clone)]
pub struct TokenService {
    oauth: IvaoOAuthClient,
    locks: RotationLocks,
}

impl TokenService {
    pub fn new(oauth: IvaoOAuthClient) -> Self {
        Self {
            oauth,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn oauth(&self) -> &IvaoOAuthClient {
        &self.oauth
    }

    /// Exchanges the refresh token stored under `key`.
    ///
    /// When the upstream returns a new refresh token it replaces the stored one and the
    /// rotation timestamp is set to now. When it returns none the stored token is kept.
    ///
    /// # Arguments
    /// - `db` - Live connection from the pool
    /// - `key` - Discord id or VID addressing the record
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Exchange succeeded, rotation persisted
    /// - `Err(TokenError::MissingRefreshToken)` - No record or no usable token
    /// - `Err(TokenError::OAuth)` - Exchange failed
    /// - `Err(TokenError::Database)` - Reading or persisting the token failed
    pub async fn refresh_identity(
        &self,
        db: &DatabaseConnection,
        key: &IdentityKey,
    ) -> Result<TokenPair, TokenError> {
        let repo = IdentityRepository::new(db);
        let missing = || TokenError::MissingRefreshToken {
            identity: key.to_string(),
        };

        let record = repo.find_by_key(key).await?.ok_or_else(missing)?;

        let lock = self
            .locks
            .entry(record.id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.rotate(&repo, key).await
        };

        drop(lock);
        self.release(record.id);

        result
    }

    /// Re-reads the stored token, exchanges it and persists the rotation.
    ///
    /// Must only be called with the record's rotation guard held.
    async fn rotate(
        &self,
        repo: &IdentityRepository<'_>,
        key: &IdentityKey,
    ) -> Result<TokenPair, TokenError> {
        let refresh_token = repo
            .find_by_key(key)
            .await?
            .and_then(|record| record.refresh_token)
            .ok_or_else(|| TokenError::MissingRefreshToken {
                identity: key.to_string(),
            })?;

        let pair = match self.oauth.refresh(&refresh_token).await {
            Ok(pair) => pair,
            Err(e) if e.is_terminal() => {
                tracing::warn!(
                    "Refresh token for {} rejected, re-authentication required: {}",
                    key,
                    e
                );
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!("Token refresh failed for {}: {}", key, e);
                return Err(e.into());
            }
        };

        if let Some(rotated) = &pair.refresh_token {
            repo.update_refresh_token(key, rotated, Utc::now()).await?;
        }

        Ok(pair)
    }

    /// Drops the guard for `record_id` once no other rotation holds or awaits it.
    fn release(&self, record_id: i32) {
        self.locks
            .remove_if(&record_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    #[cfg(test)]
    fn active_guards(&self) -> usize {
        self.locks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OAuthConfig;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;
    use test_utils::{builder::TestBuilder, factory::user_data::UserDataFactory};

    fn service(server: &MockServer) -> TokenService {
        let config = OAuthConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            token_url: server.url("/v2/oauth/token"),
            profile_url: server.url("/v2/users/me"),
        };
        let oauth = IvaoOAuthClient::new(reqwest::Client::new(), &config)
            .unwrap()
            .with_retry_base(Duration::from_millis(1));

        TokenService::new(oauth)
    }

    #[tokio::test]
    async fn persists_rotated_token() {
        let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        UserDataFactory::new(db)
            .discord_id(Some("42"))
            .refresh_token(Some("t0"))
            .refresh_token_date(None)
            .build()
            .await
            .unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).body_includes("refresh_token=t0");
                then.status(200)
                    .json_body(json!({"access_token": "a", "refresh_token": "t1"}));
            })
            .await;

        service(&server)
            .refresh_identity(db, &IdentityKey::DiscordId(42))
            .await
            .unwrap();

        let record = IdentityRepository::new(db)
            .find_by_discord_id(42)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.refresh_token.unwrap().secret(), "t1");
        assert!(record.refresh_token_date.is_some());
    }

    #[tokio::test]
    async fn keeps_token_when_not_rotated() {
        let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        UserDataFactory::new(db)
            .vid("123456")
            .refresh_token(Some("t0"))
            .build()
            .await
            .unwrap();

        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"access_token": "a"}));
            })
            .await;

        service(&server)
            .refresh_identity(db, &IdentityKey::Vid("123456".to_string()))
            .await
            .unwrap();

        let record = IdentityRepository::new(db)
            .find_by_vid("123456")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.refresh_token.unwrap().secret(), "t0");
    }

    #[tokio::test]
    async fn missing_token_never_calls_upstream() {
        let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        UserDataFactory::new(db)
            .discord_id(Some("42"))
            .refresh_token(Some(""))
            .build()
            .await
            .unwrap();

        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({"access_token": "a"}));
            })
            .await;

        let service = service(&server);
        let err = service
            .refresh_identity(db, &IdentityKey::DiscordId(42))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "No refresh token found for user 42. User needs to re-authenticate."
        );
        mock.assert_calls_async(0).await;
        assert_eq!(service.active_guards(), 0);
    }

    #[tokio::test]
    async fn concurrent_refreshes_use_rotated_token() {
        let test = TestBuilder::new().with_identity_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        UserDataFactory::new(db)
            .discord_id(Some("42"))
            .vid("123456")
            .refresh_token(Some("t0"))
            .build()
            .await
            .unwrap();

        let server = MockServer::start_async().await;
        let first = server
            .mock_async(|when, then| {
                when.method(POST).body_includes("refresh_token=t0");
                then.status(200)
                    .json_body(json!({"access_token": "a1", "refresh_token": "t1"}));
            })
            .await;
        let second = server
            .mock_async(|when, then| {
                when.method(POST).body_includes("refresh_token=t1");
                then.status(200)
                    .json_body(json!({"access_token": "a2", "refresh_token": "t2"}));
            })
            .await;

        let service = service(&server);
        let by_id = IdentityKey::DiscordId(42);
        let by_vid = IdentityKey::Vid("123456".to_string());
        let (a, b) = tokio::join!(
            service.refresh_identity(db, &by_id),
            service.refresh_identity(db, &by_vid)
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        first.assert_calls_async(1).await;
        second.assert_calls_async(1).await;
        assert_eq!(service.active_guards(), 0);
    }
}
