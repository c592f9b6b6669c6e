//! Literal formatting for scalar values.

use crate::fetcher::Value;

/// Render a value as a PHP literal.
///
/// NULL and booleans are emitted bare. Everything else, numbers included,
/// becomes a single-quoted string; the database coerces on insert.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Text(s) | Value::Other(s) => quote(s),
    }
}

/// Wrap in single quotes, escaping embedded single quotes with a backslash.
///
/// Backslashes themselves are left as they are.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
