//! Audit sink that writes remediation records to the service log.

use async_trait::async_trait;

use super::error::Result;
use super::sink::{AuditSink, REMEDIATION_EVENT};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, user_id: &str, incident_id: Option<&str>, actions: &[String]) -> Result<()> {
        tracing::info!(
            event = REMEDIATION_EVENT,
            user_id = %user_id,
            incident_id = %incident_id.unwrap_or("none"),
            actions = %actions.join(", "),
            "Remediation completed"
        );
        Ok(())
    }
}
