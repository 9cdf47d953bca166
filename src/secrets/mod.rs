//! Secret store abstraction consulted by the rotation sweep.
//!
//! The remediation core depends only on [`SecretStoreClient`]: list the
//! inventory with owner tags, and write a new value for a name.
//!
//! # Backends
//!
//! - **HashiCorp Vault** ([`VaultSecretStore`]): KV v2, owner read from custom metadata
//! - **In-memory** ([`InMemorySecretStore`]): local runs and tests
//!
//! # Security Considerations
//!
//! - Secret values travel as [`SecretString`] and are never logged
//! - Listing returns metadata only

pub mod client;
pub mod error;
pub mod memory;
pub mod types;
pub mod vault;

pub use client::{SecretEntry, SecretStoreClient};
pub use error::{Result, SecretsError};
pub use memory::InMemorySecretStore;
pub use types::SecretString;
pub use vault::{VaultConfig, VaultSecretStore, DEFAULT_OWNER_TAG};
