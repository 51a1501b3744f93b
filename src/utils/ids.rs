//! ID normalization.

use std::collections::HashSet;

use serde_json::Value;

use super::{is_truthy, render};

/// Get the string ID of a value that either is an ID or has an `_id` property.
///
/// Returns `None` for falsy input and for objects/arrays without a truthy `_id`.
///
/// ```rust
/// use fluro::utils::string_id;
/// use serde_json::json;
///
/// let id = "5cb3d8b3a2219970e6f86927";
/// assert_eq!(string_id(&json!(id)).as_deref(), Some(id));
/// assert_eq!(string_id(&json!({"_id": id, "title": "Jane"})).as_deref(), Some(id));
/// ```
pub fn string_id(input: &Value) -> Option<String> {
    if !is_truthy(input) {
        return None;
    }

    if let Some(id) = input.get("_id").filter(|id| is_truthy(id)) {
        return Some(render(id));
    }

    match input {
        Value::Object(_) | Value::Array(_) => None,
        other => Some(render(other)),
    }
}

/// Map a list of objects and/or IDs to unique string IDs.
///
/// Falsy entries and entries without an ID are dropped; order of first
/// occurrence is kept.
pub fn array_ids(values: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter_map(string_id)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: &str = "5cb3d8b3a2219970e6f86927";

    #[test]
    fn test_string_id_falsy() {
        assert_eq!(string_id(&json!(null)), None);
        assert_eq!(string_id(&json!("")), None);
        assert_eq!(string_id(&json!({"_id": null})), None);
    }

    #[test]
    fn test_string_id_object_without_id() {
        assert_eq!(string_id(&json!({"title": "Jane"})), None);
        assert_eq!(string_id(&json!([ID])), None);
    }

    #[test]
    fn test_string_id_numeric() {
        assert_eq!(string_id(&json!(42)).as_deref(), Some("42"));
        assert_eq!(string_id(&json!({"_id": 7})).as_deref(), Some("7"));
    }

    #[test]
    fn test_array_ids_compacts_and_dedupes() {
        let values = [
            json!({"_id": ID}),
            json!({"_id": ID}),
            json!(null),
            json!(ID),
            json!({"_id": "other"}),
            json!({"title": "no id"}),
        ];
        assert_eq!(array_ids(&values), vec![ID.to_string(), "other".to_string()]);
    }

    #[test]
    fn test_array_ids_empty() {
        assert!(array_ids(&[]).is_empty());
    }
}
