/// Response interpretation: HTTP status + body → JSON payload or classified error.
///
/// Failure bodies look like `{"error": {"name": "...", "message": "..."}}`.
/// Anything else on a failure status falls back to an
/// [`ApiErrorKind::HttpStatus`](crate::errors::ApiErrorKind::HttpStatus) error
/// built from the status code alone.
use log::debug;
use serde_json::Value;

use crate::errors::{ApiError, UpbitError};

/// The status returned by every successful Upbit read.
pub const STATUS_OK: u16 = 200;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn field_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract and classify the upstream error envelope, if the body has one.
pub fn classify_error(status: u16, body: &[u8]) -> Option<ApiError> {
    let parsed: Value = serde_json::from_slice(body).ok()?;
    let error = parsed.get("error")?;
    let name = error.get("name")?;
    let message = error.get("message")?;
    Some(ApiError::from_upstream(
        status,
        field_as_string(name),
        field_as_string(message),
    ))
}

fn parse_payload(body: &[u8]) -> Result<Value, UpbitError> {
    serde_json::from_slice(body).map_err(|e| {
        let text = String::from_utf8_lossy(body);
        UpbitError::Json(format!(
            "Failed to parse response: {e}\nBody: {}",
            text.chars().take(500).collect::<String>()
        ))
    })
}

/// Interpret a completed HTTP exchange.
///
/// `200` returns the parsed body unchanged. Any other status is checked for an
/// error envelope first. Other 2xx statuses without one (`201 Created` on order
/// placement) are passed through as success.
pub fn interpret(status: u16, body: &[u8]) -> Result<Value, UpbitError> {
    if status == STATUS_OK {
        return parse_payload(body);
    }

    if let Some(err) = classify_error(status, body) {
        debug!(
            "response.interpret classified status={} kind={:?} name={}",
            status, err.kind, err.name
        );
        return Err(UpbitError::Api(err));
    }

    if is_success(status) {
        debug!("response.interpret pass_through status={}", status);
        return parse_payload(body);
    }

    debug!(
        "response.interpret unclassified status={} body_len={}",
        status,
        body.len()
    );
    Err(UpbitError::Api(ApiError::http_status(status)))
}
