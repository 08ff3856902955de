//! Convenience re-exports for common boardstore usage
//!
//! # Example
//!
//! ```rust
//! use boardstore::prelude::*;
//!
//! let key = PostKey::author("jane%");
//! assert_eq!(key.conditions().len(), 1);
//! ```

// Core components
pub use crate::core::BoardStore;
pub use crate::errors::BoardStoreError;

// Repositories
pub use crate::repositories::*;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, DatabaseConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;
