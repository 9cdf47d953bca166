//! Audit sink trait and record shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Event name stamped on every remediation record.
pub const REMEDIATION_EVENT: &str = "credential_remediation";

/// Structured record of one remediation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    pub event: String,
    pub user_id: String,
    pub incident_id: Option<String>,
    pub actions: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(user_id: &str, incident_id: Option<&str>, actions: &[String]) -> Self {
        Self {
            event: REMEDIATION_EVENT.to_string(),
            user_id: user_id.to_string(),
            incident_id: incident_id.map(str::to_string),
            actions: actions.to_vec(),
            recorded_at: Utc::now(),
        }
    }
}

/// Destination for remediation records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Record the actions completed for `user_id`, in the order they completed.
    async fn record(&self, user_id: &str, incident_id: Option<&str>, actions: &[String])
        -> Result<()>;
}
