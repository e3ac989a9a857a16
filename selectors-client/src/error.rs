//! Client error handling
//!
//! Every error is terminal for the operation that raised it and nothing is retried.

use thiserror::Error;

/// Client error types
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input rejected locally; no request was made.
    #[error("{0}")]
    Validation(String),

    /// No usable response: transport failure, non-2xx lookup, or an unreadable body.
    #[error("network error: {message}")]
    Network { status: Option<u16>, message: String },

    /// The directory answered with a rejection.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("a request is already in flight")]
    Busy,
}

impl ClientError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Create a network error
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::Network {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Network { status, .. } => *status,
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Validation(_) | ClientError::Busy => None,
        }
    }

    /// Stable kind name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "validation",
            ClientError::Network { .. } => "network",
            ClientError::Api { .. } => "api",
            ClientError::Busy => "busy",
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        ClientError::Network {
            status: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}
