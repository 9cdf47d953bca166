//! # Credential Remediation
//!
//! The decision-and-execution core of the service:
//!
//! ```text
//! RemediationRequest → PolicyGate ──(Proceed)──→ RemediationEngine → RemediationResult
//!                          │                       ├─ IdentityClient
//!                          └─(DryRun | Skipped)    ├─ SecretStoreClient + SecretGenerator
//!                                                  └─ AuditSink
//! ```
//!
//! The engine is only ever invoked for a `Proceed` decision.

pub mod engine;
pub mod generator;
pub mod policy;
pub mod types;

pub use engine::{AuditFailureMode, RemediationEngine, RemediationError};
pub use generator::{OsRngSecretGenerator, SecretGenerator, GENERATED_SECRET_LENGTH};
pub use policy::{decide, PolicyDecision, PolicyGate, SkipReason, DEFAULT_THREAT_SCORE_THRESHOLD};
pub use types::{
    ActionLedger, RemediationAction, RemediationRequest, RemediationResult, RemediationStatus,
};
