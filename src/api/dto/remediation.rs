use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::errors::{Error, Result};
use crate::remediation::{PolicyDecision, RemediationRequest, RemediationResult};

pub const DRY_RUN_MESSAGE: &str = "Auto-remediation is disabled";

/// Inbound trigger body.
///
/// `userId` is optional here so its absence surfaces as a validation error
/// rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationRequestDto {
    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_threat_score")]
    pub threat_score: Option<i64>,

    #[serde(default)]
    pub incident_id: Option<String>,
}

/// Integer scores outside the `i64` range saturate; fractional scores are rejected.
fn deserialize_threat_score<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(score) = number.as_i64() {
        return Ok(Some(score));
    }
    if number.is_u64() {
        return Ok(Some(i64::MAX));
    }

    // serde_json decodes integer literals beyond u64 as floats
    match number.as_f64() {
        Some(score) if score.fract() == 0.0 && score >= i64::MAX as f64 => Ok(Some(i64::MAX)),
        Some(score) if score.fract() == 0.0 && score <= i64::MIN as f64 => Ok(Some(i64::MIN)),
        _ => Err(de::Error::custom("threatScore must be an integer")),
    }
}

impl TryFrom<RemediationRequestDto> for RemediationRequest {
    type Error = Error;

    fn try_from(dto: RemediationRequestDto) -> Result<Self> {
        let user_id = dto.user_id.unwrap_or_default();
        RemediationRequest::new(user_id, dto.threat_score.unwrap_or(0), dto.incident_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub would_execute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedResponse {
    pub status: &'static str,
    pub reason: &'static str,
    pub threat_score: i64,
    pub threshold: i64,
}

/// Every 200 body the trigger endpoint can return.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RemediationResponse {
    DryRun(DryRunResponse),
    Skipped(SkippedResponse),
    Completed(RemediationResult),
}

impl RemediationResponse {
    /// Response for a short-circuit decision; `None` for `Proceed`.
    pub fn from_decision(decision: PolicyDecision) -> Option<Self> {
        match decision {
            PolicyDecision::DryRun { would_execute } => Some(Self::DryRun(DryRunResponse {
                status: "dry_run",
                message: DRY_RUN_MESSAGE,
                would_execute,
            })),
            PolicyDecision::Skipped { reason, threat_score, threshold } => {
                Some(Self::Skipped(SkippedResponse {
                    status: "skipped",
                    reason: reason.as_str(),
                    threat_score,
                    threshold,
                }))
            }
            PolicyDecision::Proceed => None,
        }
    }
}

impl From<RemediationResult> for RemediationResponse {
    fn from(result: RemediationResult) -> Self {
        Self::Completed(result)
    }
}
