//! Error types for audit recording.

use thiserror::Error;

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors raised while recording a remediation.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The record could not be encoded.
    #[error("Failed to encode audit record: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The audit endpoint could not be reached.
    #[error("Audit delivery failed: {message}")]
    DeliveryFailed { message: String },

    /// The audit endpoint rejected the record.
    #[error("Audit endpoint returned {status}")]
    Rejected { status: u16 },

    /// Sink configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AuditError {
    /// Create a delivery failed error.
    pub fn delivery_failed(message: impl Into<String>) -> Self {
        Self::DeliveryFailed { message: message.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}
