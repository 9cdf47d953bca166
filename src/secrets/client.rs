//! Secret store client trait and inventory types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::types::SecretString;

/// One entry of the secret inventory. Never carries the secret value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretEntry {
    /// Unique secret name within the store
    pub name: String,

    /// User the secret is attributed to, when the creator tagged it
    pub owner_tag: Option<String>,
}

impl SecretEntry {
    /// Create an untagged entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), owner_tag: None }
    }

    /// Attribute the entry to an owner.
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner_tag = Some(owner.into());
        self
    }

    /// Whether the owner tag equals `user_id`. Untagged entries are owned by nobody.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_tag.as_deref() == Some(user_id)
    }
}

/// Trait for secret store backends consulted during remediation.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values
/// - `list_secrets` returns names and ownership metadata only
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// List every secret in the store together with its owner tag.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConnectionFailed`] if the backend is unreachable
    /// - [`SecretsError::MetadataUnavailable`] if a listed secret's tags cannot be read
    ///
    /// [`SecretsError::ConnectionFailed`]: super::SecretsError::ConnectionFailed
    /// [`SecretsError::MetadataUnavailable`]: super::SecretsError::MetadataUnavailable
    async fn list_secrets(&self) -> Result<Vec<SecretEntry>>;

    /// Store a new value for `name`, replacing the current one.
    ///
    /// The value MUST NOT be logged or exposed in error messages.
    async fn set_secret(&self, name: &str, value: &SecretString) -> Result<()>;
}
