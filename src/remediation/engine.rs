//! Remediation engine: the ordered response to a compromised account.
//!
//! Steps run strictly in sequence and the first failure stops the run:
//!
//! 1. revoke sessions
//! 2. force a password reset (MFA required at next sign-in)
//! 3. rotate every secret whose owner tag equals the user id
//! 4. record the run with the audit sink
//!
//! Completed steps are never rolled back. Every outcome, including a failure
//! partway, is returned as a [`RemediationResult`]; nothing is propagated.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::generator::{OsRngSecretGenerator, SecretGenerator};
use super::types::{ActionLedger, RemediationAction, RemediationResult};
use crate::audit::{AuditError, AuditSink};
use crate::identity::{IdentityClient, IdentityError};
use crate::observability::metrics;
use crate::secrets::{SecretStoreClient, SecretsError};

/// First collaborator failure of a run.
#[derive(Error, Debug)]
pub enum RemediationError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Secrets(#[from] SecretsError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// How an audit sink failure affects the reported status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuditFailureMode {
    /// The run is reported as failed even though every action completed.
    #[default]
    Fail,
    /// The run keeps its success status and carries the failure in `audit_error`.
    Warn,
}

impl std::str::FromStr for AuditFailureMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "fail" => Ok(AuditFailureMode::Fail),
            "warn" => Ok(AuditFailureMode::Warn),
            other => Err(format!("unknown audit failure mode '{}' (expected fail or warn)", other)),
        }
    }
}

#[derive(Default)]
struct RunState {
    ledger: ActionLedger,
    rotated: Vec<String>,
    audit_error: Option<String>,
}

pub struct RemediationEngine {
    identity: Arc<dyn IdentityClient>,
    secrets: Arc<dyn SecretStoreClient>,
    audit: Arc<dyn AuditSink>,
    generator: Arc<dyn SecretGenerator>,
    audit_failure_mode: AuditFailureMode,
}

impl RemediationEngine {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        secrets: Arc<dyn SecretStoreClient>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            identity,
            secrets,
            audit,
            generator: Arc::new(OsRngSecretGenerator),
            audit_failure_mode: AuditFailureMode::default(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn SecretGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_audit_failure_mode(mut self, mode: AuditFailureMode) -> Self {
        self.audit_failure_mode = mode;
        self
    }

    pub fn audit_failure_mode(&self) -> AuditFailureMode {
        self.audit_failure_mode
    }

    /// Run the full remediation sequence for one user.
    #[instrument(skip(self), fields(user_id = %user_id, incident_id = ?incident_id))]
    pub async fn execute(&self, user_id: &str, incident_id: Option<&str>) -> RemediationResult {
        let started = Instant::now();
        let mut run = RunState::default();

        let result = match self.run_steps(user_id, incident_id, &mut run).await {
            Ok(()) => {
                info!(
                    actions = ?run.ledger.tags(),
                    rotated_secrets = ?run.rotated,
                    "Credential remediation succeeded"
                );
                let result =
                    RemediationResult::success(user_id, incident_id, run.ledger, run.rotated);
                match run.audit_error {
                    Some(audit_error) => result.with_audit_error(audit_error),
                    None => result,
                }
            }
            Err(e) => {
                error!(
                    error = %e,
                    completed_actions = ?run.ledger.tags(),
                    rotated_secrets = ?run.rotated,
                    "Credential remediation failed"
                );
                RemediationResult::failed(
                    user_id,
                    incident_id,
                    run.ledger,
                    run.rotated,
                    e.to_string(),
                )
            }
        };

        metrics::record_remediation_run(
            result.status.as_str(),
            result.rotated_secrets_count,
            started.elapsed().as_secs_f64(),
        );
        result
    }

    async fn run_steps(
        &self,
        user_id: &str,
        incident_id: Option<&str>,
        run: &mut RunState,
    ) -> Result<(), RemediationError> {
        info!("Revoking all sessions");
        self.identity.revoke_sessions(user_id).await?;
        run.ledger.record(RemediationAction::RevokedSessions);

        info!("Forcing password reset");
        self.identity.set_force_password_reset(user_id, true).await?;
        run.ledger.record(RemediationAction::ForcedPasswordReset);

        self.rotate_owned_secrets(user_id, &mut run.rotated).await?;
        if !run.rotated.is_empty() {
            run.ledger.record(RemediationAction::RotatedSecrets(run.rotated.len()));
        }

        if let Err(e) = self.audit.record(user_id, incident_id, &run.ledger.tags()).await {
            match self.audit_failure_mode {
                AuditFailureMode::Fail => return Err(e.into()),
                AuditFailureMode::Warn => {
                    warn!(error = %e, "Audit record failed; remediation actions stand");
                    run.audit_error = Some(e.to_string());
                }
            }
        }

        Ok(())
    }

    /// Rotate every secret owned by `user_id`. `rotated` grows as each write lands,
    /// so it is accurate even when a later write fails.
    async fn rotate_owned_secrets(
        &self,
        user_id: &str,
        rotated: &mut Vec<String>,
    ) -> Result<(), RemediationError> {
        let inventory = self.secrets.list_secrets().await?;

        for entry in inventory.iter().filter(|entry| entry.is_owned_by(user_id)) {
            info!(secret = %entry.name, "Rotating secret");
            let value = self.generator.generate();
            self.secrets.set_secret(&entry.name, &value).await?;
            rotated.push(entry.name.clone());
        }

        Ok(())
    }
}
