//! In-process secret store for local runs and tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::client::{SecretEntry, SecretStoreClient};
use super::error::{Result, SecretsError};
use super::types::SecretString;

#[derive(Clone)]
struct StoredSecret {
    owner_tag: Option<String>,
    value: SecretString,
    version: u64,
}

/// Map-backed [`SecretStoreClient`]. Listing order is by name.
#[derive(Default)]
pub struct InMemorySecretStore {
    secrets: RwLock<BTreeMap<String, StoredSecret>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret, optionally attributed to an owner.
    pub async fn insert(&self, name: &str, owner_tag: Option<&str>, value: &str) {
        let mut secrets = self.secrets.write().await;
        secrets.insert(
            name.to_string(),
            StoredSecret {
                owner_tag: owner_tag.map(str::to_string),
                value: SecretString::new(value),
                version: 1,
            },
        );
    }

    /// Current value of `name`.
    pub async fn value(&self, name: &str) -> Option<SecretString> {
        self.secrets.read().await.get(name).map(|s| s.value.clone())
    }

    /// Current version of `name`; every successful write bumps it.
    pub async fn version(&self, name: &str) -> Option<u64> {
        self.secrets.read().await.get(name).map(|s| s.version)
    }
}

#[async_trait]
impl SecretStoreClient for InMemorySecretStore {
    async fn list_secrets(&self) -> Result<Vec<SecretEntry>> {
        let secrets = self.secrets.read().await;
        Ok(secrets
            .iter()
            .map(|(name, stored)| SecretEntry {
                name: name.clone(),
                owner_tag: stored.owner_tag.clone(),
            })
            .collect())
    }

    async fn set_secret(&self, name: &str, value: &SecretString) -> Result<()> {
        let mut secrets = self.secrets.write().await;
        let stored = secrets.get_mut(name).ok_or_else(|| SecretsError::not_found(name))?;
        stored.value = value.clone();
        stored.version += 1;
        Ok(())
    }
}
