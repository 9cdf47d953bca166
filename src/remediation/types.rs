//! Remediation data model: request, action ledger and run result.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::errors::{Error, Result};

/// A validated remediation request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationRequest {
    user_id: String,
    threat_score: i64,
    incident_id: Option<String>,
}

impl RemediationRequest {
    /// Build a request, rejecting an empty user id.
    pub fn new(
        user_id: impl Into<String>,
        threat_score: i64,
        incident_id: Option<String>,
    ) -> Result<Self> {
        let user_id = user_id.into();
        if user_id.is_empty() {
            return Err(Error::validation("userId is required"));
        }
        Ok(Self { user_id, threat_score, incident_id })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn threat_score(&self) -> i64 {
        self.threat_score
    }

    pub fn incident_id(&self) -> Option<&str> {
        self.incident_id.as_deref()
    }
}

/// One completed remediation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationAction {
    RevokedSessions,
    ForcedPasswordReset,
    /// Number of owned secrets rotated; only recorded when non-zero
    RotatedSecrets(usize),
}

impl fmt::Display for RemediationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemediationAction::RevokedSessions => write!(f, "revoked_sessions"),
            RemediationAction::ForcedPasswordReset => write!(f, "forced_password_reset"),
            RemediationAction::RotatedSecrets(count) => write!(f, "rotated_secrets:{}", count),
        }
    }
}

/// Ordered, append-only record of the steps completed in one run.
///
/// Serializes as a list of action tags, e.g.
/// `["revoked_sessions", "forced_password_reset", "rotated_secrets:2"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLedger {
    entries: Vec<RemediationAction>,
}

impl ActionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed step.
    pub fn record(&mut self, action: RemediationAction) {
        self.entries.push(action);
    }

    pub fn entries(&self) -> &[RemediationAction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Action tags in completion order.
    pub fn tags(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}

impl Serialize for ActionLedger {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.entries.iter().map(ToString::to_string))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationStatus {
    Success,
    Failed,
}

impl RemediationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemediationStatus::Success => "success",
            RemediationStatus::Failed => "failed",
        }
    }
}

/// Outcome of one engine run.
#[derive(Debug, Clone, Serialize)]
pub struct RemediationResult {
    pub status: RemediationStatus,
    pub user_id: String,
    pub incident_id: Option<String>,
    pub actions_taken: ActionLedger,
    pub timestamp: DateTime<Utc>,
    pub rotated_secrets_count: usize,

    /// Present only when `status` is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Audit failure tolerated under the `warn` audit failure mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_error: Option<String>,

    /// Names of the rotated secrets, for logs only
    #[serde(skip)]
    pub rotated_secrets: Vec<String>,
}

impl RemediationResult {
    pub fn success(
        user_id: &str,
        incident_id: Option<&str>,
        actions_taken: ActionLedger,
        rotated_secrets: Vec<String>,
    ) -> Self {
        Self {
            status: RemediationStatus::Success,
            user_id: user_id.to_string(),
            incident_id: incident_id.map(str::to_string),
            actions_taken,
            timestamp: Utc::now(),
            rotated_secrets_count: rotated_secrets.len(),
            error: None,
            audit_error: None,
            rotated_secrets,
        }
    }

    pub fn failed(
        user_id: &str,
        incident_id: Option<&str>,
        actions_taken: ActionLedger,
        rotated_secrets: Vec<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            status: RemediationStatus::Failed,
            error: Some(error.into()),
            ..Self::success(user_id, incident_id, actions_taken, rotated_secrets)
        }
    }

    pub fn with_audit_error(mut self, audit_error: impl Into<String>) -> Self {
        self.audit_error = Some(audit_error.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == RemediationStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_user_id() {
        let err = RemediationRequest::new("", 90, None).unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg == "userId is required"));

        let request = RemediationRequest::new("u1", -5, Some("INC-1".to_string())).unwrap();
        assert_eq!(request.user_id(), "u1");
        assert_eq!(request.threat_score(), -5);
        assert_eq!(request.incident_id(), Some("INC-1"));
    }

    #[test]
    fn test_action_tags() {
        assert_eq!(RemediationAction::RevokedSessions.to_string(), "revoked_sessions");
        assert_eq!(RemediationAction::ForcedPasswordReset.to_string(), "forced_password_reset");
        assert_eq!(RemediationAction::RotatedSecrets(3).to_string(), "rotated_secrets:3");
    }

    #[test]
    fn test_ledger_preserves_completion_order() {
        let mut ledger = ActionLedger::new();
        assert!(ledger.is_empty());

        ledger.record(RemediationAction::RevokedSessions);
        ledger.record(RemediationAction::ForcedPasswordReset);
        ledger.record(RemediationAction::RotatedSecrets(2));

        assert_eq!(ledger.len(), 3);
        assert_eq!(
            ledger.tags(),
            vec!["revoked_sessions", "forced_password_reset", "rotated_secrets:2"]
        );
        assert_eq!(
            serde_json::to_value(&ledger).unwrap(),
            json!(["revoked_sessions", "forced_password_reset", "rotated_secrets:2"])
        );
    }

    #[test]
    fn test_success_result_json_shape() {
        let mut ledger = ActionLedger::new();
        ledger.record(RemediationAction::RevokedSessions);
        let result = RemediationResult::success("u1", None, ledger, vec![]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["user_id"], "u1");
        assert!(value["incident_id"].is_null());
        assert_eq!(value["actions_taken"], json!(["revoked_sessions"]));
        assert_eq!(value["rotated_secrets_count"], 0);
        assert!(value["timestamp"].is_string());
        assert!(value.get("error").is_none());
        assert!(value.get("audit_error").is_none());
        assert!(value.get("rotated_secrets").is_none());
    }

    #[test]
    fn test_failed_result_keeps_partial_counts() {
        let result = RemediationResult::failed(
            "u1",
            Some("INC-9"),
            ActionLedger::new(),
            vec!["a".to_string()],
            "Backend error: vault sealed",
        );

        assert!(!result.is_success());
        assert_eq!(result.rotated_secrets_count, 1);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["incident_id"], "INC-9");
        assert_eq!(value["error"], "Backend error: vault sealed");
    }
}
