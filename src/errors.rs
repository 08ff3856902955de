//! Error types for the boardstore crate
//!
//! This module contains all error types that can be returned by boardstore operations.

use config::ConfigError;
use store_object::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardStoreError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Post not found: {0}")]
    PostNotFound(u64),
}

impl BoardStoreError {
    /// Missing-condition guard failures map to a client error upstream
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_guard())
    }
}
