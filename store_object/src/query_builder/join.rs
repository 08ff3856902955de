/// Represents the type of SQL JOIN operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN - returns records that have matching values in both tables
    Inner,
    /// LEFT JOIN - returns all records from the left table and matched records from the right table
    Left,
}

impl JoinType {
    /// Convert JoinType to SQL string
    pub fn to_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// Represents a complete JOIN clause
///
/// The columns are compared with `=`; `extra_condition` is appended verbatim
/// with `AND`, so it must never carry caller-supplied values.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// Type of join (INNER or LEFT)
    pub join_type: JoinType,
    /// Table to join with
    pub table: String,
    /// Optional table alias
    pub alias: Option<String>,
    /// Column on the left side of the ON comparison
    pub left_column: String,
    /// Column on the right side of the ON comparison
    pub right_column: String,
    /// Raw expression ANDed onto the ON clause
    pub extra_condition: Option<String>,
}

impl JoinClause {
    /// Create a new JOIN clause comparing two columns
    pub fn new(
        join_type: JoinType,
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self {
            join_type,
            table: table.into(),
            alias: None,
            left_column: left_column.into(),
            right_column: right_column.into(),
            extra_condition: None,
        }
    }

    /// INNER JOIN shorthand
    pub fn inner(
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self::new(JoinType::Inner, table, left_column, right_column)
    }

    /// LEFT JOIN shorthand
    pub fn left(
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self::new(JoinType::Left, table, left_column, right_column)
    }

    /// Add an alias for the joined table
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// AND a raw expression onto the ON clause
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.extra_condition = Some(condition.into());
        self
    }

    /// Get the table reference (alias if present, otherwise table name)
    pub fn table_ref(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_type_to_sql() {
        assert_eq!(JoinType::Inner.to_sql(), "INNER JOIN");
        assert_eq!(JoinType::Left.to_sql(), "LEFT JOIN");
    }

    #[test]
    fn test_join_clause_inner() {
        let join = JoinClause::inner("comment", "po.id", "cmt.postId");

        assert_eq!(join.join_type, JoinType::Inner);
        assert_eq!(join.table, "comment");
        assert_eq!(join.alias, None);
        assert_eq!(join.left_column, "po.id");
        assert_eq!(join.right_column, "cmt.postId");
        assert_eq!(join.extra_condition, None);
    }

    #[test]
    fn test_join_clause_with_alias_and_condition() {
        let join = JoinClause::left("comment", "po.id", "cmt.postId")
            .with_alias("cmt")
            .with_condition("cmt.depth = 1");

        assert_eq!(join.join_type, JoinType::Left);
        assert_eq!(join.table_ref(), "cmt");
        assert_eq!(join.extra_condition.as_deref(), Some("cmt.depth = 1"));
    }

    #[test]
    fn test_join_clause_table_ref_without_alias() {
        let join = JoinClause::inner("keyword", "po.author", "keyword.author");
        assert_eq!(join.table_ref(), "keyword");
    }
}
