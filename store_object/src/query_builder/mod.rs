//! Query builder utilities
//!
//! Hand-built MySQL statement construction: literal escaping, conditions,
//! joins, ordering, limits, update assignments and the statement builder
//! that ties them together.

pub mod builder;
pub mod condition;
pub mod escape;
pub mod join;
pub mod ordering;
pub mod pagination;
pub mod sql_generation;
pub mod update;


pub use builder::{Command, StatementBuilder};
pub use condition::{Condition, QueryOperator};
pub use escape::{escape_literal, quote_identifier};
pub use join::{JoinClause, JoinType};
pub use ordering::SortOrder;
pub use pagination::Pagination;
pub use sql_generation::SqlGenerator;
pub use update::{UpdateAssignment, UpdateOperation, UpdateSet};
