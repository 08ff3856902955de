//! Literal escaping and identifier quoting for MySQL statement text.
//!
//! Values are never bound as parameters; every literal that reaches a
//! statement goes through [`escape_literal`].

use serde_json::Value;

static NULL: Value = Value::Null;

/// Wrap a possibly dotted `table.column` reference in backticks, one segment at a time.
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 4);
    for (index, segment) in name.split('.').filter(|s| !s.is_empty()).enumerate() {
        if index > 0 {
            quoted.push('.');
        }
        quoted.push('`');
        quoted.push_str(&segment.replace('`', "``"));
        quoted.push('`');
    }
    quoted
}

/// Render a scalar as a SQL literal token.
pub fn escape_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => escape_string(text),
        // Nested values are stored as their JSON text
        other => escape_string(&other.to_string()),
    }
}

/// Backslash-escape a string and wrap it in single quotes.
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('\'');
    for ch in text.chars() {
        match ch {
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\u{1a}' => escaped.push_str("\\Z"),
            '\\' | '\'' | '"' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            _ => escaped.push(ch),
        }
    }
    escaped.push('\'');
    escaped
}

/// Empty strings are written as NULL in VALUES and SET lists.
pub fn normalize_value(value: &Value) -> &Value {
    match value {
        Value::String(text) if text.is_empty() => &NULL,
        other => other,
    }
}
