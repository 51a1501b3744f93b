//! Utility functions.
//!
//! Small helpers shared by Fluro services: query strings, display lists,
//! ID normalization and readable error messages. Inputs are loosely typed
//! JSON as returned by the API.

mod errors;
mod format;
mod ids;

pub use errors::error_message;
pub use format::{comma, map_parameters};
pub use ids::{array_ids, string_id};

use serde_json::Value;

/// Whether a JSON value counts as "present": not null, false, zero or empty string.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up a dotted path (`"response.data.message"`, `"items.0.title"`).
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Render a value for display: strings unquoted, null as empty.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(1.5)));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_get_path() {
        let value = json!({"response": {"data": {"message": "nope"}}, "items": [{"title": "cat"}]});
        assert_eq!(get_path(&value, "response.data.message"), Some(&json!("nope")));
        assert_eq!(get_path(&value, "items.0.title"), Some(&json!("cat")));
        assert_eq!(get_path(&value, "items.3.title"), None);
        assert_eq!(get_path(&value, "response.missing"), None);
        assert_eq!(get_path(&json!("text"), "length"), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&json!("dog")), "dog");
        assert_eq!(render(&json!(null)), "");
        assert_eq!(render(&json!(3)), "3");
        assert_eq!(render(&json!(true)), "true");
    }
}
