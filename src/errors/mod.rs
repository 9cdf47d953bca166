//! # Error Handling
//!
//! Crate-level error type for startup, configuration and server paths.
//! Collaborator backends carry their own error enums (see [`crate::secrets::SecretsError`],
//! [`crate::identity::IdentityError`], [`crate::audit::AuditError`]).

/// Custom result type for credential rotator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the credential rotator service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request or configuration validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network transport errors (HTTP listener, outbound clients)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}

impl From<crate::secrets::SecretsError> for Error {
    fn from(error: crate::secrets::SecretsError) -> Self {
        Self::config(format!("Secret store initialisation failed: {}", error))
    }
}

impl From<crate::identity::IdentityError> for Error {
    fn from(error: crate::identity::IdentityError) -> Self {
        Self::config(format!("Directory client initialisation failed: {}", error))
    }
}

impl From<crate::audit::AuditError> for Error {
    fn from(error: crate::audit::AuditError) -> Self {
        Self::config(format!("Audit sink initialisation failed: {}", error))
    }
}
