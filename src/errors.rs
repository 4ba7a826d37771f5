//! Error types shared by the API client, the session store and configuration.
//! Backend error bodies (`{"detail": ...}`) are decoded here so every feature
//! surfaces the same user-facing message for the same response.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of error body characters kept when the body is not structured.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        /// Message decoded from a `{"detail": ...}` body, if there was one.
        detail: Option<String>,
        /// Whether the body was JSON at all.
        json: bool,
    },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Builds an HTTP error from a status and the raw response body.
    #[must_use]
    pub fn http(status: u16, body: &str) -> Self {
        let detail = detail_message(body);
        let message = detail.clone().unwrap_or_else(|| sanitize_body(body));

        Self::Http {
            status,
            message,
            detail,
            json: serde_json::from_str::<Value>(body).is_ok(),
        }
    }

    /// Backend-supplied detail, when the failure carried one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Fields(Vec<FieldError>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    msg: String,
}

/// Extracts the user-facing message from a backend error body.
///
/// A string `detail` is returned verbatim. A list of field errors is joined
/// with `". "` in array order. Anything else, including an empty message,
/// yields `None` so callers can fall back to a generic message.
#[must_use]
pub fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;

    let message = match parsed.detail? {
        Detail::Message(message) => message,
        Detail::Fields(fields) => fields
            .into_iter()
            .map(|field| field.msg)
            .collect::<Vec<_>>()
            .join(". "),
        Detail::Other(_) => return None,
    };

    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

/// Trims and truncates unstructured error bodies.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
