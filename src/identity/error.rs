//! Error types for directory operations.

use thiserror::Error;

/// Result type for directory operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

/// Errors raised by an [`IdentityClient`](super::IdentityClient).
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("Directory request failed: {message}")]
    RequestFailed { message: String },

    /// The directory answered with a non-success status.
    #[error("Directory returned {status} for {operation}: {body}")]
    UnexpectedStatus { operation: String, status: u16, body: String },

    /// The user id cannot be addressed in a directory URL.
    #[error("Invalid user id '{user_id}': {reason}")]
    InvalidUserId { user_id: String, reason: String },

    /// Client configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl IdentityError {
    /// Create a request failed error.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed { message: message.into() }
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus { operation: operation.into(), status, body: body.into() }
    }

    /// Create an invalid user id error.
    pub fn invalid_user_id(user_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUserId { user_id: user_id.into(), reason: reason.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(error: reqwest::Error) -> Self {
        Self::request_failed(error.to_string())
    }
}
