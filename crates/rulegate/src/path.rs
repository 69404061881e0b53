//! Dot-delimited path resolution over a JSON record.
//!
//! Paths address nested keys (`"data.has_categories"`). When the current node
//! is an array, a segment that parses as an unsigned integer indexes into it
//! (`"files.0.name"`). Absence is an ordinary outcome and is reported through
//! the return value, never as an error.

use serde_json::Value;

/// Returns the value at `path`, or `None` if any segment is missing.
///
/// A present key whose value is `null`, `""` or `false` still resolves.
/// The empty path never resolves.
///
/// # Examples
///
/// ```
/// use rulegate::path::extract;
/// use serde_json::json;
///
/// let record = json!({"data": {"has_categories": "1"}});
/// assert_eq!(extract(&record, "data.has_categories"), Some(&json!("1")));
/// assert_eq!(extract(&record, "data.missing"), None);
/// ```
pub fn extract<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Returns `true` iff every segment of `path` is present in `record`.
///
/// # Examples
///
/// ```
/// use rulegate::path::exists;
/// use serde_json::json;
///
/// let record = json!({"has_categories": ""});
/// assert!(exists(&record, "has_categories"));
/// assert!(!exists(&record, "type"));
/// ```
pub fn exists(record: &Value, path: &str) -> bool {
    extract(record, path).is_some()
}

/// JSON type name of a value, as used in error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
