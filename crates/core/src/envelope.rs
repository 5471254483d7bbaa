//! Normalization of backend error bodies into one human-readable message.
//!
//! The backend reports failures in several shapes:
//!
//! ```text
//! {"errors": [{"msg": ".."}, {"message": ".."}, ...]}   bulk/validation
//! {"detail": [{"loc": [..], "msg": "..", "type": ".."}]}  request validation
//! {"detail": ".."}                                       domain errors
//! {"error": ".."}                                        proxy errors
//! ```
//!
//! [`error_message`] applies these in that order of precedence and falls
//! back to a caller-provided default.

use serde_json::Value;

/// Message surfaced whenever the backend answers 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";

/// Parse an error body, treating anything that is not JSON as `{}`.
pub fn parse_error_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// The fallback message used when the body carries nothing usable.
pub fn default_message(action: &str, status_text: &str) -> String {
    format!("Failed to {action}: {status_text}")
}

/// Extract the most specific message from an error body.
pub fn error_message(body: &Value, default: &str) -> String {
    if let Some(joined) = errors_array_message(body) {
        return joined;
    }
    if let Some(detail) = detail_message(body, default) {
        return detail;
    }
    match body.get("error").and_then(Value::as_str) {
        Some(error) if !error.is_empty() => error.to_string(),
        _ => default.to_string(),
    }
}

fn errors_array_message(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let parts: Vec<String> = errors
        .iter()
        .map(entry_message)
        .filter(|m| !m.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn entry_message(entry: &Value) -> String {
    for key in ["msg", "message"] {
        if let Some(text) = entry.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    match entry {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// An array `detail` always settles the message: its first `msg`, else the
/// default. It never falls through to `error`.
fn detail_message(body: &Value, default: &str) -> Option<String> {
    match body.get("detail")? {
        Value::Array(items) => {
            let msg = items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty());
            Some(msg.unwrap_or(default).to_string())
        }
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}
