use crate::query_builder::escape::{escape_literal, quote_identifier};
use serde_json::Value;

/// Type of update operation to perform on a field
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOperation {
    /// Set field to a specific value: field = value
    Set(Value),

    /// Copy another column: field = other_column
    Column(String),

    /// Increment field by a value: field = field + value
    Plus(Value),

    /// Decrement field by a value: field = field - value
    Minus(Value),
}

impl UpdateOperation {
    /// Generate the SET item for this operation.
    ///
    /// Arithmetic with a non-numeric operand yields `None` and the item is left out.
    pub fn to_sql(&self, field_name: &str) -> Option<String> {
        let column = quote_identifier(field_name);
        match self {
            UpdateOperation::Set(value) => Some(format!("{} = {}", column, escape_literal(value))),
            UpdateOperation::Column(source) => {
                Some(format!("{} = {}", column, quote_identifier(source)))
            }
            UpdateOperation::Plus(Value::Number(n)) => {
                Some(format!("{} = {} + {}", column, column, n))
            }
            UpdateOperation::Minus(Value::Number(n)) => {
                Some(format!("{} = {} - {}", column, column, n))
            }
            UpdateOperation::Plus(_) | UpdateOperation::Minus(_) => None,
        }
    }
}

/// One SET item of an arithmetic update
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAssignment {
    pub field: String,
    pub operation: UpdateOperation,
}

impl UpdateAssignment {
    pub fn new(field: impl Into<String>, operation: UpdateOperation) -> Self {
        Self {
            field: field.into(),
            operation,
        }
    }
}

/// Ordered container for update assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    pub assignments: Vec<UpdateAssignment>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self {
            assignments: Vec::new(),
        }
    }

    /// Set a field to a specific value
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments
            .push(UpdateAssignment::new(field, UpdateOperation::Set(value.into())));
        self
    }

    /// Copy the value of another column into a field
    pub fn column(mut self, field: impl Into<String>, source: impl Into<String>) -> Self {
        self.assignments
            .push(UpdateAssignment::new(field, UpdateOperation::Column(source.into())));
        self
    }

    /// Increment a field in place (field = field + value)
    pub fn plus(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments
            .push(UpdateAssignment::new(field, UpdateOperation::Plus(value.into())));
        self
    }

    /// Decrement a field in place (field = field - value)
    pub fn minus(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments
            .push(UpdateAssignment::new(field, UpdateOperation::Minus(value.into())));
        self
    }

    /// Check if there are any operations
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Get number of operations
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn into_assignments(self) -> Vec<UpdateAssignment> {
        self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plus_and_minus_render_in_place_arithmetic() {
        assert_eq!(
            UpdateOperation::Plus(json!(5)).to_sql("views").as_deref(),
            Some("`views` = `views` + 5")
        );
        assert_eq!(
            UpdateOperation::Minus(json!(2)).to_sql("stock").as_deref(),
            Some("`stock` = `stock` - 2")
        );
    }

    #[test]
    fn test_arithmetic_with_non_numeric_value_is_skipped() {
        assert_eq!(UpdateOperation::Plus(json!("5")).to_sql("views"), None);
        assert_eq!(UpdateOperation::Minus(json!(null)).to_sql("views"), None);
    }

    #[test]
    fn test_set_and_column() {
        assert_eq!(
            UpdateOperation::Set(json!("it's")).to_sql("title").as_deref(),
            Some(r"`title` = 'it\'s'")
        );
        assert_eq!(
            UpdateOperation::Column("id".to_string()).to_sql("groupId").as_deref(),
            Some("`groupId` = `id`")
        );
    }

    #[test]
    fn test_update_set_keeps_call_order() {
        let set = UpdateSet::new().plus("views", 1).set("title", "x").column("a", "b");
        let fields: Vec<&str> = set.assignments.iter().map(|a| a.field.as_str()).collect();
        assert_eq!(fields, vec!["views", "title", "a"]);
        assert_eq!(set.len(), 3);
    }
}
