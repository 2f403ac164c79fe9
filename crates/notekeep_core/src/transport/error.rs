//! Normalized failure type for notes API calls.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ApiResult<T> = Result<T, ApiError>;

/// Single failure value surfaced by transport and note service calls.
///
/// `Display` yields the string a caller shows to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be built (bad header, unserializable body).
    InvalidRequest(String),
    /// Request never produced a response (offline, DNS, reset).
    Network(String),
    /// Failure status with a structured `error` message from the server.
    Server { status: u16, message: String },
    /// Failure status with a missing or unstructured body.
    Status { status: u16 },
    /// Success status but the body does not have the expected shape.
    Decode(String),
}

impl ApiError {
    /// HTTP status code of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Status { status } => Some(*status),
            Self::InvalidRequest(_) | Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the server reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Stable short code used in log records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::Network(_) => "network",
            Self::Server { .. } => "server",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "invalid request: {message}"),
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Server { message, .. } => f.write_str(message),
            Self::Status { status } => write!(f, "HTTP error! status: {status}"),
            Self::Decode(message) => write!(f, "malformed response body: {message}"),
        }
    }
}

impl Error for ApiError {}
