//! HashiCorp Vault KV v2 secret store.
//!
//! Ownership is read from each secret's KV v2 `custom_metadata`, under the key
//! configured as `SECRET_OWNER_TAG` (default `owner`). Rotation writes a new
//! KV v2 version holding `{"value": <secret>}`; custom metadata is version
//! independent and survives the write.
//!
//! # Configuration
//!
//! - `VAULT_ADDR`: Vault server address (required)
//! - `VAULT_TOKEN`: Authentication token
//! - `VAULT_NAMESPACE`: Optional Enterprise namespace
//! - `VAULT_MOUNT_PATH`: KV v2 mount path (default: "secret")

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::error::ClientError;
use vaultrs::kv2;

use super::client::{SecretEntry, SecretStoreClient};
use super::error::{Result, SecretsError};
use super::types::SecretString;

/// Default custom-metadata key carrying the owning user id.
pub const DEFAULT_OWNER_TAG: &str = "owner";

/// Configuration for the Vault backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault server address (e.g., "https://vault.example.com:8200")
    pub address: String,

    /// Vault authentication token (if using token auth)
    pub token: Option<String>,

    /// Vault namespace (for Enterprise multi-tenancy)
    pub namespace: Option<String>,

    /// KV v2 mount path (default: "secret")
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Custom-metadata key holding the owner user id
    #[serde(default = "default_owner_tag")]
    pub owner_tag: String,
}

fn default_mount_path() -> String {
    "secret".to_string()
}

fn default_owner_tag() -> String {
    DEFAULT_OWNER_TAG.to_string()
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8200".to_string(),
            token: None,
            namespace: None,
            mount_path: default_mount_path(),
            owner_tag: default_owner_tag(),
        }
    }
}

/// Vault-backed [`SecretStoreClient`].
///
/// This client is `Send + Sync` and can be shared across concurrent remediation runs.
pub struct VaultSecretStore {
    client: VaultClient,
    mount_path: String,
    owner_tag: String,
}

impl VaultSecretStore {
    /// Connects to Vault and verifies reachability with a health check.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the configuration is invalid
    /// - [`SecretsError::ConnectionFailed`] if Vault is unreachable
    pub async fn new(config: VaultConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }
        if config.owner_tag.is_empty() {
            return Err(SecretsError::config_error("Secret owner tag cannot be empty"));
        }

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(ref token) = config.token {
            settings_builder.token(token);
        }

        if let Some(namespace) = config.namespace.clone() {
            settings_builder.namespace(Some(namespace));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let client = VaultClient::new(settings).map_err(|e| {
            SecretsError::connection_failed(format!("Failed to create Vault client: {}", e))
        })?;

        match vaultrs::sys::health(&client).await {
            Ok(_) => {
                tracing::info!(address = %config.address, mount_path = %config.mount_path, "Connected to Vault");
            }
            Err(e) => {
                tracing::error!(error = %e, address = %config.address, "Failed to connect to Vault");
                return Err(SecretsError::connection_failed(format!(
                    "Vault health check failed: {}",
                    e
                )));
            }
        }

        Ok(Self { client, mount_path: config.mount_path, owner_tag: config.owner_tag })
    }

    /// List every leaf key under the mount, descending into folders.
    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut pending = vec![String::new()];
        let mut keys = Vec::new();

        while let Some(prefix) = pending.pop() {
            let children = match kv2::list(&self.client, &self.mount_path, &prefix).await {
                Ok(children) => children,
                // Vault answers 404 for a folder with nothing in it
                Err(ClientError::APIError { code: 404, .. }) => Vec::new(),
                Err(e) => {
                    tracing::error!(error = %e, mount_path = %self.mount_path, prefix = %prefix, "Failed to list secrets from Vault");
                    return Err(SecretsError::backend_error(format!(
                        "Failed to list secrets: {}",
                        e
                    )));
                }
            };

            for child in children {
                let full = join_key(&prefix, &child);
                if is_folder(&child) {
                    pending.push(full);
                } else {
                    keys.push(full);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

fn join_key(prefix: &str, child: &str) -> String {
    format!("{}{}", prefix, child)
}

fn is_folder(key: &str) -> bool {
    key.ends_with('/')
}

fn owner_from_metadata(
    custom_metadata: Option<&HashMap<String, String>>,
    owner_tag: &str,
) -> Option<String> {
    custom_metadata.and_then(|tags| tags.get(owner_tag)).cloned()
}

#[async_trait]
impl SecretStoreClient for VaultSecretStore {
    async fn list_secrets(&self) -> Result<Vec<SecretEntry>> {
        let keys = self.list_keys().await?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let metadata =
                kv2::read_metadata(&self.client, &self.mount_path, &key).await.map_err(|e| {
                    tracing::error!(error = %e, key = %key, "Failed to read secret metadata from Vault");
                    SecretsError::metadata_unavailable(&key, e.to_string())
                })?;

            let owner_tag = owner_from_metadata(metadata.custom_metadata.as_ref(), &self.owner_tag);
            entries.push(SecretEntry { name: key, owner_tag });
        }

        tracing::debug!(count = entries.len(), mount_path = %self.mount_path, "Listed secret inventory");
        Ok(entries)
    }

    async fn set_secret(&self, name: &str, value: &SecretString) -> Result<()> {
        if name.is_empty() {
            return Err(SecretsError::invalid_key(name, "secret name cannot be empty"));
        }

        let mut data = HashMap::new();
        data.insert("value".to_string(), value.expose_secret().to_string());

        kv2::set(&self.client, &self.mount_path, name, &data).await.map_err(|e| {
            tracing::error!(error = %e, key = %name, "Failed to write secret to Vault");
            SecretsError::backend_error(format!("Failed to store secret '{}': {}", name, e))
        })?;

        tracing::info!(key = %name, mount_path = %self.mount_path, "Stored new secret version in Vault");
        Ok(())
    }
}
