/// Error types for the Upbit SDK.
///
/// Upstream failures are classified into [`ApiError`], a single struct tagged
/// with an [`ApiErrorKind`]. Everything else (transport, configuration,
/// decoding) is a separate [`UpbitError`] variant.
use std::fmt;

use thiserror::Error;

/// Synthetic upstream name used when a failure body carries no error envelope.
pub const HTTP_STATUS_ERROR_NAME: &str = "http_status_error";

/// Classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Any upstream error name without a dedicated kind.
    Generic,
    /// `create_ask_error` / `create_bid_error`.
    CreateOrder,
    /// `under_min_total_*` and `insufficient_funds_*`.
    UnderMinTotal,
    /// Non-2xx response without a parseable `{"error": {...}}` body.
    HttpStatus,
}

impl ApiErrorKind {
    /// Kind for an upstream `error.name`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "create_ask_error" | "create_bid_error" => ApiErrorKind::CreateOrder,
            "insufficient_funds_ask" | "insufficient_funds_bid" => ApiErrorKind::UnderMinTotal,
            "under_min_total_ask" | "under_min_total_bid" => ApiErrorKind::UnderMinTotal,
            _ => ApiErrorKind::Generic,
        }
    }
}

/// A classified upstream error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status_code: u16,
    pub name: String,
    pub message: String,
}

impl ApiError {
    /// Classify an upstream `{"error": {"name", "message"}}` envelope.
    pub fn from_upstream(
        status_code: u16,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            kind: ApiErrorKind::from_name(&name),
            status_code,
            name,
            message: message.into(),
        }
    }

    /// Fallback error derived from the status code alone.
    pub fn http_status(status_code: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown Status");
        Self {
            kind: ApiErrorKind::HttpStatus,
            status_code,
            name: HTTP_STATUS_ERROR_NAME.to_string(),
            message: format!("HTTP {status_code} {reason}"),
        }
    }

    /// True for `insufficient_funds_ask` / `insufficient_funds_bid`.
    ///
    /// These share [`ApiErrorKind::UnderMinTotal`] with the minimum-total
    /// errors; the upstream name tells them apart.
    pub fn is_insufficient_funds(&self) -> bool {
        self.name.starts_with("insufficient_funds_")
    }

    /// True for `under_min_total_ask` / `under_min_total_bid`.
    pub fn is_under_min_total(&self) -> bool {
        self.name.starts_with("under_min_total_")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.status_code, self.name, self.message)
    }
}

impl std::error::Error for ApiError {}

/// The primary error type for the Upbit SDK.
#[derive(Error, Debug)]
pub enum UpbitError {
    #[error("Upbit API error {0}")]
    Api(ApiError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl UpbitError {
    /// The classified upstream error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            UpbitError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Upstream HTTP status code for classified errors.
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status_code)
    }

    /// Kind of the classified upstream error, if any.
    pub fn kind(&self) -> Option<ApiErrorKind> {
        self.api_error().map(|e| e.kind)
    }
}

impl From<ApiError> for UpbitError {
    fn from(err: ApiError) -> Self {
        UpbitError::Api(err)
    }
}

impl From<reqwest::Error> for UpbitError {
    fn from(err: reqwest::Error) -> Self {
        UpbitError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for UpbitError {
    fn from(err: serde_json::Error) -> Self {
        UpbitError::Json(err.to_string())
    }
}
