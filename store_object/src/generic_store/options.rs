//! Option bags accepted by the generic store operations

use crate::query_builder::{Condition, JoinClause, SortOrder};

/// Shape of a read / update / delete / count beyond its key conditions
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Select-list expressions; `*` when empty
    pub fields: Vec<String>,
    pub order_by: Vec<(String, SortOrder)>,
    /// Inner and left joins, applied in insertion order
    pub joins: Vec<JoinClause>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub group_by: Vec<String>,
    pub having: Vec<Condition>,
    /// Permit running without any WHERE predicate
    pub no_condition_allowed: bool,
    /// Appended to the caller's conditions before routing
    pub extra_conditions: Vec<Condition>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, expression: impl Into<String>) -> Self {
        self.fields.push(expression.into());
        self
    }

    pub fn fields<I, S>(mut self, expressions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(expressions.into_iter().map(Into::into));
        self
    }

    pub fn order_by(mut self, expression: impl Into<String>, order: SortOrder) -> Self {
        self.order_by.push((expression.into(), order));
        self
    }

    pub fn join(mut self, join: JoinClause) -> Self {
        self.joins.push(join);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    pub fn having(mut self, condition: Condition) -> Self {
        self.having.push(condition);
        self
    }

    pub fn allow_no_condition(mut self) -> Self {
        self.no_condition_allowed = true;
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.extra_conditions.push(condition);
        self
    }
}

/// Conflict handling for INSERT statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertOptions {
    /// `INSERT IGNORE`; unset means ignore
    pub ignore: Option<bool>,
    /// Columns refreshed by `ON DUPLICATE KEY UPDATE`
    pub on_duplicate: Vec<String>,
}

impl InsertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = Some(ignore);
        self
    }

    pub fn on_duplicate(mut self, field: impl Into<String>) -> Self {
        self.on_duplicate.push(field.into());
        self
    }

    /// An upsert never also ignores; otherwise IGNORE unless switched off
    pub fn uses_ignore(&self) -> bool {
        self.on_duplicate.is_empty() && self.ignore.unwrap_or(true)
    }
}
