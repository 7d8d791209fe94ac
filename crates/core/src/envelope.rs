use serde_json::{json, Value};

pub const BITCOIN_ERROR_LABEL: &str = "Error fetching Bitcoin price";
pub const ACTIVITY_ERROR_LABEL: &str = "Error fetching random activity";
pub const NEWS_ERROR_LABEL: &str = "Error fetching news headlines";

/// Build the `{"error": "<label>: <message>"}` value returned in place of a failure
pub fn error_envelope(label: &str, message: impl std::fmt::Display) -> Value {
    json!({ "error": format!("{label}: {message}") })
}

/// Whether a value is an error envelope: an object whose only key is `error`
pub fn is_error_envelope(value: &Value) -> bool {
    value
        .as_object()
        .map(|map| map.len() == 1 && map.get("error").is_some_and(Value::is_string))
        .unwrap_or(false)
}
