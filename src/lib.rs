//! # boardstore
//!
//! MySQL persistence core for a bulletin board: a hand-built statement
//! builder, a generic table store and the post, comment and keyword
//! repositories composed from it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use boardstore::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 3306, "board".to_string(),
//!         "board".to_string(), "password".to_string(),
//!         1, 10, 30, 600, 1800,
//!     );
//!
//!     let store = BoardStore::new(config).await?;
//!     store.auto_migrate(false).await?;
//!
//!     let posts = store.posts();
//!     let created = posts
//!         .create_post(&NewPost {
//!             title: "Hello".to_string(),
//!             author: "jane".to_string(),
//!             content: "First post".to_string(),
//!             iv: "iv".to_string(),
//!             encrypted: "secret".to_string(),
//!         })
//!         .await?;
//!
//!     let page = posts
//!         .read_all_post_list(&PostListQuery {
//!             limit: 10,
//!             offset: 0,
//!             search: Some(PostSearch::Author("ja".to_string())),
//!         })
//!         .await?;
//!     println!("post {} created, {} on first page", created.insert_id, page.len());
//!
//!     store.close().await;
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod prelude;
pub mod repositories;

// Re-export the main public types for convenience
pub use crate::core::BoardStore;
pub use errors::BoardStoreError;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig};

// Re-export internal crates used in the public API
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
