//! Core boardstore functionality
//!
//! This module contains the main BoardStore struct: it owns the connection
//! pool and hands out repositories that share it.

use std::sync::Arc;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use store_object::{ConnectionPool, QueryExecutor};

use crate::errors::BoardStoreError;
use crate::repositories::{CommentRepository, KeywordRepository, PostRepository};
use config::{AppConfig, DatabaseConfig};

/// Main coordinator that manages the database connection and repositories
pub struct BoardStore {
    pool: Option<ConnectionPool>,
    executor: Arc<dyn QueryExecutor>,
}

impl BoardStore {
    /// Create new BoardStore with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, BoardStoreError> {
        config.validate()?;

        let connect_options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database)
            .charset(&config.charset);

        let mut pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect_with(connect_options).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "MySQL pool ready"
        );

        let pool = ConnectionPool::new(pool);
        Ok(Self {
            executor: Arc::new(pool.clone()),
            pool: Some(pool),
        })
    }

    /// Connect using [`AppConfig::load`]
    pub async fn from_env() -> Result<Self, BoardStoreError> {
        let config = AppConfig::load()?;
        Self::new(config.database).await
    }

    /// Run on an executor other than a MySQL pool
    pub fn with_executor(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            pool: None,
            executor,
        }
    }

    /// Get connection pool reference, when backed by one
    pub fn pool(&self) -> Option<&ConnectionPool> {
        self.pool.as_ref()
    }

    pub fn executor(&self) -> Arc<dyn QueryExecutor> {
        Arc::clone(&self.executor)
    }

    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.executor())
    }

    pub fn comments(&self) -> CommentRepository {
        CommentRepository::new(self.executor())
    }

    pub fn keywords(&self) -> KeywordRepository {
        KeywordRepository::new(self.executor())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), BoardStoreError> {
        self.executor.query("SELECT 1;").await?;
        crate::trace_log!("Health check passed");
        Ok(())
    }

    /// Drain the pool: waits for in-flight statements, then closes every connection
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("MySQL pool closed");
        }
    }
}
