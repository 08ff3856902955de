//! Store Object - table access layer for boardstore
//!
//! This crate provides the hand-built MySQL statement builder, the executor
//! seam over the connection pool and the generic table store the entity
//! repositories are composed from.

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

pub mod errors;
pub mod generic_store;
pub mod pool;
pub mod prelude;
pub mod query_builder;
pub mod traits;

pub use errors::{QueryError, Severity, StoreError};
pub use generic_store::{GenericStore, InsertOptions, QueryOptions};
pub use pool::{ConnectionPool, QueryExecutor, Row, WriteResult};
pub use query_builder::{
    Condition, JoinClause, QueryOperator, SortOrder, StatementBuilder, UpdateAssignment, UpdateSet,
};
pub use traits::*;
