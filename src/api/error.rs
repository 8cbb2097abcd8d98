use reqwest::StatusCode;
use thiserror::Error;

use super::types::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never reached the server, or the reply could not be read.
    NetworkFailure,
    /// The server answered with a non-success status.
    ServerError,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{message}")]
    Server { status: StatusCode, message: String },
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Decode(_) => ApiErrorKind::NetworkFailure,
            ApiError::Server { .. } => ApiErrorKind::ServerError,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }

    /// Build the error for a non-success response. A string `detail` in the
    /// body wins; anything else falls back to the status code.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            });
        let message =
            detail.unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
        ApiError::Server { status, message }
    }
}
