//! Readable messages from API error responses.

use serde_json::Value;

use super::{get_path, is_truthy, render};

/// Where servers put the human readable part of an error, in priority order.
const MESSAGE_PATHS: [&str; 3] = ["response.data.message", "response.data", "message"];

/// Extract a human readable message from an error response.
///
/// Takes the first present value among `response.data.message`,
/// `response.data` and `message`. If that is not a non-empty string, the
/// error itself is rendered instead.
///
/// ```rust
/// use fluro::utils::error_message;
/// use serde_json::json;
///
/// let err = json!({"response": {"data": {"message": "Invalid token"}}, "message": "Request failed"});
/// assert_eq!(error_message(&err), "Invalid token");
/// ```
pub fn error_message(err: &Value) -> String {
    let message = MESSAGE_PATHS
        .iter()
        .filter_map(|path| get_path(err, path))
        .find(|candidate| is_truthy(candidate));

    match message {
        Some(Value::String(message)) if !message.is_empty() => message.clone(),
        _ => render(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_data_string() {
        let err = json!({"response": {"data": "Not found"}, "message": "Request failed with status code 404"});
        assert_eq!(error_message(&err), "Not found");
    }

    #[test]
    fn test_falls_back_to_message() {
        let err = json!({"response": {"data": ""}, "message": "Network Error"});
        assert_eq!(error_message(&err), "Network Error");
    }

    #[test]
    fn test_non_string_message_renders_error() {
        let err = json!({"response": {"data": {"code": 500}}});
        assert_eq!(error_message(&err), r#"{"response":{"data":{"code":500}}}"#);
    }

    #[test]
    fn test_plain_string_error() {
        assert_eq!(error_message(&json!("timeout")), "timeout");
    }
}
