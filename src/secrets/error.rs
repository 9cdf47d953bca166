//! Error types for secret store operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SecretsError>;

/// Failures of a [`SecretStoreClient`](super::SecretStoreClient) during the
/// rotation sweep. Messages name the key but never carry a value.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// The key vanished between listing and rotation.
    #[error("Secret not found: {key}")]
    NotFound { key: String },

    #[error("Backend connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Invalid secret key: {key} - {reason}")]
    InvalidKey { key: String, reason: String },

    /// Owner tags for a listed key could not be read, so ownership is unknown.
    #[error("Failed to read metadata for secret '{key}': {reason}")]
    MetadataUnavailable { key: String, reason: String },

    /// The store refused or failed a list or write.
    #[error("Backend error: {message}")]
    BackendError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SecretsError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into(), reason: reason.into() }
    }

    pub fn metadata_unavailable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataUnavailable { key: key.into(), reason: reason.into() }
    }

    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}
