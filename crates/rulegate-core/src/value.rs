//! Helpers over raw JSON values

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Identifier optionally followed by dot or bracket segments (`a.b[0].c`)
static FIELD_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\[\]]*$").expect("field path pattern"));

/// Check a field path against the path grammar
pub fn is_valid_field_path(path: &str) -> bool {
    !path.is_empty() && FIELD_PATH.is_match(path)
}

/// Truthiness used for required config keys.
///
/// `null`, `false`, `0` and `""` count as missing. Empty arrays and objects
/// are present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a value for messages: strings unquoted, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
