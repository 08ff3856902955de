//! Filter predicates consumed by the statement builder.

use serde_json::Value;

/// Comparison operators a condition can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryOperator {
    #[default]
    Eq, // =
    Ne,       // !=
    Gt,       // >
    Lt,       // <
    Gte,      // >=
    Lte,      // <=
    Like,     // LIKE
    FullText, // MATCH ... AGAINST
}

impl QueryOperator {
    pub fn to_sql(&self) -> &'static str {
        match self {
            QueryOperator::Eq => "=",
            QueryOperator::Ne => "!=",
            QueryOperator::Gt => ">",
            QueryOperator::Lt => "<",
            QueryOperator::Gte => ">=",
            QueryOperator::Lte => "<=",
            QueryOperator::Like => "LIKE",
            // Rendered as a MATCH fragment, never as an infix operator
            QueryOperator::FullText => "MATCH",
        }
    }
}

/// One filter predicate contributing to a WHERE or HAVING clause.
///
/// Conditions are plain values: build one per call with the constructors
/// below and refine it with the chained flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub value: Value,
    pub operator: QueryOperator,
    /// Member of the OR-list instead of the AND-list
    pub disjunctive: bool,
    /// Closes the current OR group and opens a new one
    pub starts_new_or_group: bool,
    /// Field is emitted verbatim instead of identifier-quoted
    pub raw_field: bool,
    /// Adds `IN BOOLEAN MODE` to a full-text match
    pub boolean_mode: bool,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: QueryOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
            disjunctive: false,
            starts_new_or_group: false,
            raw_field: false,
            boolean_mode: false,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Eq, value)
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Ne, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, QueryOperator::Lte, value)
    }

    /// LIKE condition; the pattern is used as given
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, QueryOperator::Like, Value::String(pattern.into()))
    }

    /// Full-text MATCH ... AGAINST condition
    pub fn full_text(field: impl Into<String>, query: impl Into<String>, boolean_mode: bool) -> Self {
        let mut condition = Self::new(field, QueryOperator::FullText, Value::String(query.into()));
        condition.boolean_mode = boolean_mode;
        condition
    }

    /// Move this condition to the OR-list
    pub fn or(mut self) -> Self {
        self.disjunctive = true;
        self
    }

    /// Move this condition to the OR-list and start a new parenthesized group with it
    pub fn or_group(mut self) -> Self {
        self.disjunctive = true;
        self.starts_new_or_group = true;
        self
    }

    /// Emit the field text as-is (functions, expressions)
    pub fn raw(mut self) -> Self {
        self.raw_field = true;
        self
    }

    pub fn is_full_text(&self) -> bool {
        self.operator == QueryOperator::FullText
    }

    /// An empty field paired with an empty value contributes nothing.
    pub fn is_noop(&self) -> bool {
        let empty_value = match &self.value {
            Value::Null => true,
            Value::String(text) => text.is_empty(),
            _ => false,
        };
        self.field.is_empty() && empty_value
    }
}
