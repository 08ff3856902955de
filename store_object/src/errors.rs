use std::fmt;
use thiserror::Error;

/// Programming errors detected while assembling a statement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("No statement command was selected before {0}")]
    NoCommand(&'static str),

    #[error("{clause} is not valid for a {command} statement")]
    InvalidClause {
        clause: &'static str,
        command: &'static str,
    },

    #[error("Cannot start a {requested} statement on a builder holding a {current} statement")]
    CommandConflict {
        current: &'static str,
        requested: &'static str,
    },

    #[error("{0} condition has a value but no field")]
    EmptyField(&'static str),

    #[error("UPDATE on {0} has no assignments left to apply")]
    EmptyAssignments(String),
}

/// Alerting level attached to execution failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Query filter condition is not defined for {table}: {statement}")]
    MissingCondition { table: String, statement: String },

    #[error("Query build error: {0}")]
    Query(#[from] QueryError),

    #[error("Query execution failed: {source} (statement: {statement})")]
    Execution {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Row decode error: {message} (statement: {statement})")]
    Decode { statement: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StoreError {
    /// Wrap a driver failure together with the statement that caused it
    pub fn execution(statement: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Execution {
            statement: statement.into(),
            source,
        }
    }

    pub fn missing_condition(table: impl Into<String>, statement: impl Into<String>) -> Self {
        Self::MissingCondition {
            table: table.into(),
            statement: statement.into(),
        }
    }

    pub fn decode(statement: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Decode {
            statement: statement.into(),
            message: message.to_string(),
        }
    }

    /// Execution failures are critical; everything else is a caller or shape problem
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Self::Execution { .. } => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Self::MissingCondition { .. })
    }

    /// Statement text attached for diagnostics, when there is one
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::MissingCondition { statement, .. }
            | Self::Execution { statement, .. }
            | Self::Decode { statement, .. } => Some(statement),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_is_critical() {
        let error = StoreError::execution("SELECT 1;", sqlx::Error::Protocol("boom".into()));
        assert_eq!(error.severity(), Some(Severity::Critical));
        assert_eq!(error.statement(), Some("SELECT 1;"));
        assert!(!error.is_guard());
    }

    #[test]
    fn test_guard_error() {
        let error = StoreError::missing_condition("post", "DELETE FROM `post`;");
        assert!(error.is_guard());
        assert_eq!(error.severity(), None);
        assert!(error.to_string().contains("post"));
    }

    #[test]
    fn test_query_error_message() {
        let error = QueryError::InvalidClause {
            clause: "limit",
            command: "INSERT",
        };
        assert_eq!(error.to_string(), "limit is not valid for a INSERT statement");
    }
}
