//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! [`TableApiError`] describes what went wrong talking to the remote Table
//! API; [`ConnectorError`] is the crate-wide error that wraps it.

use thiserror::Error;

/// Main connector error type
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied input is invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote Table API errors
    #[error("Table API error: {0}")]
    Remote(#[from] TableApiError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ConnectorError {
    /// Whether this error reports a missing remote record
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConnectorError::Remote(TableApiError::NotFound(_)))
    }
}

/// Errors raised by the Table API client
///
/// The variants let callers distinguish "does not exist" from "request or
/// response malformed" from "remote service unreachable or garbled".
#[derive(Debug, Error)]
pub enum TableApiError {
    /// The remote record does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other unsuccessful exchange: non-success status, HTML body,
    /// unreachable service, or a batch the server did not service
    #[error("Remote request failed{}: {message}", status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    RequestFailed {
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Raw response body or transport error text
        message: String,
    },

    /// Transport succeeded but the payload didn't have the expected structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Caller-supplied record is missing something the request requires
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl TableApiError {
    /// Builds a `RequestFailed` for a received response
    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        TableApiError::RequestFailed {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Builds a `RequestFailed` for a transport-level failure
    pub fn unreachable(message: impl Into<String>) -> Self {
        TableApiError::RequestFailed {
            status: None,
            message: format!("service unreachable: {}", message.into()),
        }
    }
}

impl From<std::io::Error> for ConnectorError {
    fn from(err: std::io::Error) -> Self {
        ConnectorError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ConnectorError {
    fn from(err: toml::de::Error) -> Self {
        ConnectorError::Configuration(format!("TOML parse error: {err}"))
    }
}
