//! Errors raised while talking to Notion or reading its records

use serde::Deserialize;
use thiserror::Error;

/// Notion client errors
#[derive(Error, Debug)]
pub enum NotionError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid request ({status} {code}): {message}")]
    InvalidRequest {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Malformed record {page_id}: property '{field}' {reason}")]
    MalformedRecord {
        page_id: String,
        field: String,
        reason: String,
    },
}

/// Result alias for Notion operations
pub type Result<T> = std::result::Result<T, NotionError>;

/// Error body returned by the API: `{"object":"error","status":404,"code":...}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl NotionError {
    pub(crate) fn malformed(
        page_id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            page_id: page_id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classify a non-success response by status code and error body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = if parsed.message.is_empty() {
            body.to_string()
        } else {
            parsed.message
        };

        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            429 | 500..=599 => Self::Unavailable(format!("status {}: {}", status, message)),
            _ => Self::InvalidRequest {
                status,
                code: parsed.code,
                message,
            },
        }
    }

    /// Whether the error came from a missing page or database
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for NotionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
