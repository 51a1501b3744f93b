//! Query-string and display-list formatting.

use serde_json::{Map, Value};
use url::form_urlencoded::Serializer;

use super::{get_path, is_truthy, render};

/// Map an object literal to `key=value` query-string pairs joined by `&`.
///
/// Keys and values are form-encoded (`application/x-www-form-urlencoded`):
/// a space becomes `+`, not `%20`. Servers decoding query strings treat both
/// the same, but a caller comparing against a `%20`-encoded URL will not
/// match byte for byte.
///
/// Pairs follow `serde_json::Map` iteration order, which is sorted by key
/// (insertion order is not kept). Nested values are encoded as their JSON
/// text.
///
/// ```rust
/// use fluro::utils::map_parameters;
/// use serde_json::json;
///
/// let params = json!({"hello": "world", "this": "that"});
/// assert_eq!(map_parameters(params.as_object().unwrap()), "hello=world&this=that");
/// ```
pub fn map_parameters(parameters: &Map<String, Value>) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in parameters {
        serializer.append_pair(key, &render(value));
    }
    serializer.finish()
}

/// Join values into a comma separated string.
///
/// Falsy values are skipped. With `path`, each value is replaced by the
/// property at that dotted path; a missing property renders empty.
///
/// ```rust
/// use fluro::utils::comma;
/// use serde_json::json;
///
/// assert_eq!(comma(&[json!("cat"), json!("dog"), json!("bird")], None), "cat, dog, bird");
///
/// let titled = [json!({"title": "cat"}), json!({"title": "dog"})];
/// assert_eq!(comma(&titled, Some("title")), "cat, dog");
/// ```
pub fn comma(values: &[Value], path: Option<&str>) -> String {
    values
        .iter()
        .filter(|value| is_truthy(value))
        .map(|value| match path {
            Some(path) => get_path(value, path).map(render).unwrap_or_default(),
            None => render(value),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
