//! HTTP plumbing shared by the login and content clients.

use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::errors::SeedrError;

/// Builds the connection pool owned by a `Login` or `Seedr` value.
///
/// # Errors
/// - `SeedrError::Configuration` - Invalid base URL
/// - `SeedrError::Network` - TLS backend could not be initialized
pub(crate) fn build_client(config: &ApiConfig) -> Result<reqwest::Client, SeedrError> {
    config.validate()?;

    Ok(reqwest::Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(3))
        .build()?)
}

/// Reads a JSON body, keeping non-success statuses as `SeedrError::Api`.
///
/// Bodies that are not JSON are reported as a parse error on success
/// statuses and as the error message otherwise.
pub(crate) async fn read_json(response: reqwest::Response) -> Result<Value, SeedrError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(status = %status, bytes = body.len(), "Received response");

    match serde_json::from_str::<Value>(&body) {
        Ok(value) if status.is_success() => Ok(value),
        Ok(value) => Err(SeedrError::Api {
            status: status.as_u16(),
            message: error_message(&value).unwrap_or(body),
        }),
        Err(_) if !status.is_success() => Err(SeedrError::Api {
            status: status.as_u16(),
            message: body,
        }),
        Err(e) => Err(SeedrError::Parse {
            reason: format!("response is not JSON: {e}"),
        }),
    }
}

/// Extracts the service's error text from an error payload.
pub(crate) fn error_message(value: &Value) -> Option<String> {
    ["error_description", "error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Error codes the resource endpoint uses for dead access tokens.
pub(crate) fn is_token_error(value: &Value) -> bool {
    matches!(
        value.get("error").and_then(Value::as_str),
        Some("expired_token" | "invalid_token")
    )
}

/// Folds the service's string-valued `result` into `result: false` plus `error`.
///
/// Some calls answer `"result": "not_enough_space_added_to_wishlist"`
/// instead of a boolean.
pub(crate) fn normalize_envelope(mut value: Value) -> Value {
    if let Some(object) = value.as_object_mut() {
        if let Some(Value::String(reason)) = object.get("result").cloned() {
            if !matches!(reason.as_str(), "1" | "true") {
                object.insert("result".to_string(), Value::Bool(false));
                object
                    .entry("error")
                    .or_insert_with(|| Value::String(reason));
            }
        }
    }
    value
}
