//! Error taxonomy for backend calls.
//!
//! DESIGN
//! ======
//! The backend reports failures as `{"detail": ...}` bodies where `detail` is
//! either a message string or a list of validation entries with `msg` fields.
//! Parsing lives here so every endpoint maps status + body the same way.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Failure of a single backend request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Client-side input check failed; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// 401/403: bad credentials or an expired token.
    #[error("{}", .detail.as_deref().unwrap_or("invalid credentials"))]
    Unauthorized { status: u16, detail: Option<String> },

    /// Any other non-2xx response.
    #[error("{}", server_error_message(.status, .detail.as_deref()))]
    Server { status: u16, detail: Option<String> },

    /// The request never produced a response.
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// A 2xx response whose body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = parse_detail(body);
        match status {
            401 | 403 => Self::Unauthorized { status, detail },
            _ => Self::Server { status, detail },
        }
    }

    /// Whether the backend answered with something we could interpret.
    pub fn has_response(&self) -> bool {
        match self {
            Self::Unauthorized { .. } => true,
            Self::Server { detail, .. } => detail.is_some(),
            Self::Validation(_) | Self::Network(_) | Self::Timeout | Self::Decode(_) => false,
        }
    }

    /// Server-provided message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail, .. } | Self::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn server_error_message(status: &u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("server error {status}: {detail}"),
        None => format!("server error {status}"),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: DetailField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetailField {
    Message(String),
    Entries(Vec<DetailEntry>),
}

#[derive(Deserialize)]
struct DetailEntry {
    msg: String,
}

/// Extract a human-readable message from a `{"detail": ...}` error body.
pub fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.detail {
        DetailField::Message(message) => message,
        DetailField::Entries(entries) => entries.into_iter().map(|e| e.msg).collect::<Vec<_>>().join("; "),
    };
    let message = message.trim().to_owned();
    (!message.is_empty()).then_some(message)
}
