//! Convenience re-exports for common store-object usage

// Table description
pub use crate::traits::TableMetadata;

// Error types
pub use crate::errors::{QueryError, StoreError};

// Core store functionality
pub use crate::generic_store::{GenericStore, InsertOptions, QueryOptions};
pub use crate::pool::{ConnectionPool, QueryExecutor, Row, WriteResult};

// Query building
pub use crate::query_builder::{
    Condition, JoinClause, QueryOperator, SortOrder, StatementBuilder, UpdateAssignment, UpdateSet,
};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
