//! Connection pool lifecycle.

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::sync::RwLock;

use crate::{config::DatabaseConfig, error::store::StoreError};

const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Shared handle to the database connection pool.
///
/// Clones share the same underlying pool. The pool is `None` after `close()` or when a
/// recreate attempt by the health check failed; every caller then gets
/// `StoreError::Unavailable` until a later health check succeeds.
#[derive(Clone)]
pub struct DatabasePool {
    config: DatabaseConfig,
    inner: Arc<RwLock<Option<DatabaseConnection>>>,
}

impl DatabasePool {
    /// Connects to the database and runs pending migrations.
    ///
    /// # Arguments
    /// - `config` - Connection string and pool sizing
    ///
    /// # Returns
    /// - `Ok(DatabasePool)` - Pool connected with migrations applied
    /// - `Err(DbErr)` - Failed to connect to database or run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = open(config).await?;

        Ok(Self::from_connection(config.clone(), db))
    }

    /// Wraps an already established connection.
    pub fn from_connection(config: DatabaseConfig, db: DatabaseConnection) -> Self {
        Self {
            config,
            inner: Arc::new(RwLock::new(Some(db))),
        }
    }

    /// Returns a handle to the live pool.
    ///
    /// # Returns
    /// - `Ok(DatabaseConnection)` - Cheap clone sharing the pool
    /// - `Err(StoreError::Unavailable)` - Pool closed or not recreated yet
    pub async fn connection(&self) -> Result<DatabaseConnection, StoreError> {
        self.inner
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(StoreError::Unavailable)
    }

    /// Runs a liveness ping against the pool.
    ///
    /// # Returns
    /// - `true` - Pool present and the ping succeeded
    /// - `false` - Pool absent or the ping failed
    pub async fn check_connection(&self) -> bool {
        let Ok(db) = self.connection().await else {
            return false;
        };

        match db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Database connection check failed: {}", e);
                false
            }
        }
    }

    /// Checks the pool and recreates it when the check fails.
    ///
    /// # Returns
    /// - `true` - Pool healthy, or recreated successfully
    /// - `false` - Recreate failed; the pool is left absent
    pub async fn ping_pool(&self) -> bool {
        if self.check_connection().await {
            return true;
        }

        tracing::warn!("Database ping failed, attempting to recreate pool");

        let mut guard = self.inner.write().await;
        if let Some(old) = guard.take() {
            if let Err(e) = old.close().await {
                tracing::debug!("Closing unhealthy pool failed: {}", e);
            }
        }

        match open(&self.config).await {
            Ok(db) => {
                *guard = Some(db);
                tracing::info!("Database connection pool recreated");
                true
            }
            Err(e) => {
                tracing::error!("Failed to recreate pool: {}", e);
                false
            }
        }
    }

    /// Drains and closes the pool.
    pub async fn close(&self) {
        let Some(db) = self.inner.write().await.take() else {
            return;
        };

        match db.close().await {
            Ok(()) => tracing::info!("Database connection pool closed"),
            Err(e) => tracing::error!("Failed to close database pool: {}", e),
        }
    }
}

async fn open(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(&config.url);
    opt.min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .max_lifetime(config.max_lifetime)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    tracing::info!("Database connection pool created successfully");

    Ok(db)
}
