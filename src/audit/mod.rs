//! Remediation audit trail.
//!
//! The engine records every run through [`AuditSink`]. Two sinks ship:
//! [`TracingAuditSink`] writes to the service log, [`WebhookAuditSink`]
//! delivers a signed JSON record to an HTTP collector.

pub mod error;
pub mod log;
pub mod sink;
pub mod webhook;

pub use error::{AuditError, Result};
pub use log::TracingAuditSink;
pub use sink::{AuditRecord, AuditSink, REMEDIATION_EVENT};
pub use webhook::{WebhookAuditConfig, WebhookAuditSink, SIGNATURE_HEADER};
