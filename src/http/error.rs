//! Error types for the REST client.

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::http::ApiClient) calls.
///
/// `Display` for `Transport` is the bare transport message, because the binding layer
/// stores `to_string()` verbatim as the entry's error text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend answered 401 or 403.
    #[error("Unauthorized")]
    Unauthorized,

    /// The response failed its structural check under an enforcing policy.
    #[error("Response validation failed: {0}")]
    Validation(String),

    /// The response body could not be decoded into the expected type.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The configured base URL or client settings are unusable.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport("timeout".to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl ApiError {
    /// Maps a non-success status and its body to an error.
    ///
    /// The backend's JSON `message` (or `error`) field is preferred over the raw body.
    pub fn from_status(status: u16, path: &str, body: &str) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(path.to_string()),
            _ => ApiError::Status {
                status,
                message: backend_message(body),
            },
        }
    }
}

fn backend_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|field| json.get(*field).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}
