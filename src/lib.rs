//! # Credential Rotator
//!
//! Automated response for accounts flagged as compromised by an upstream
//! detection pipeline. Given a user id and a threat score, the service decides
//! whether to act and, when it does, revokes the user's sessions, forces a
//! password reset, rotates every secret tagged as owned by the user and records
//! the outcome.
//!
//! ## Architecture
//!
//! ```text
//! POST /api/credential-rotation → PolicyGate → RemediationEngine
//!                                                  ├── IdentityClient   (directory)
//!                                                  ├── SecretStoreClient (Vault KV v2)
//!                                                  ├── SecretGenerator
//!                                                  └── AuditSink        (log / webhook)
//! ```
//!
//! Collaborators are injected into [`remediation::RemediationEngine`] as trait
//! objects; nothing is held in global state.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use credential_rotator::{Config, Result, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let server = Server::new(config).await?;
//!     server.run().await
//! }
//! ```

pub mod api;
pub mod audit;
pub mod config;
pub mod errors;
pub mod identity;
pub mod observability;
pub mod remediation;
pub mod secrets;

use std::sync::Arc;

// Re-export commonly used types and traits
pub use config::Config;
pub use errors::{Error, Result};

use api::{start_api_server, ApiState};
use audit::{AuditSink, TracingAuditSink, WebhookAuditSink};
use identity::GraphIdentityClient;
use remediation::RemediationEngine;
use secrets::VaultSecretStore;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Wires the configured collaborators into the engine and serves the API.
pub struct Server {
    config: Config,
    state: ApiState,
}

impl Server {
    /// Build every collaborator from configuration. Fails if the secret store
    /// is unreachable or a client cannot be constructed.
    pub async fn new(config: Config) -> Result<Self> {
        let secrets = Arc::new(VaultSecretStore::new(config.vault.clone()).await?);
        let identity = Arc::new(GraphIdentityClient::new(config.directory.clone())?);

        let audit: Arc<dyn AuditSink> = match config.audit.webhook() {
            Some(webhook) => {
                tracing::info!(url = %webhook.url, "Audit records delivered to webhook");
                Arc::new(WebhookAuditSink::new(webhook)?)
            }
            None => {
                tracing::info!("Audit records written to service log");
                Arc::new(TracingAuditSink::new())
            }
        };

        let engine = RemediationEngine::new(identity, secrets, audit)
            .with_audit_failure_mode(config.remediation.audit_failure_mode);
        let state = ApiState::new(config.remediation.policy_gate(), Arc::new(engine));

        Ok(Self { config, state })
    }

    /// Serve until ctrl-c.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            app_name = APP_NAME,
            version = VERSION,
            enforcement_enabled = self.state.gate.enforcement_enabled(),
            threshold = self.state.gate.threshold(),
            "Starting credential rotator"
        );

        start_api_server(self.config.api.clone(), self.state).await?;

        tracing::info!("Shutting down server");
        Ok(())
    }

    /// Get a reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
