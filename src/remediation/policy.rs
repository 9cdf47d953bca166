//! Policy gate deciding whether a flagged account is remediated.

use std::fmt;

/// Default `THREAT_SCORE_THRESHOLD`.
pub const DEFAULT_THREAT_SCORE_THRESHOLD: i64 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BelowThreshold,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::BelowThreshold => "threat score below threshold",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Enforcement is off; `would_execute` says what enforcement would have done.
    DryRun { would_execute: bool },
    Skipped { reason: SkipReason, threat_score: i64, threshold: i64 },
    Proceed,
}

impl PolicyDecision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, PolicyDecision::Proceed)
    }

    /// Label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyDecision::DryRun { .. } => "dry_run",
            PolicyDecision::Skipped { .. } => "skipped",
            PolicyDecision::Proceed => "proceed",
        }
    }
}

/// Pure gate decision. A score equal to the threshold proceeds.
pub fn decide(threat_score: i64, enforcement_enabled: bool, threshold: i64) -> PolicyDecision {
    if !enforcement_enabled {
        return PolicyDecision::DryRun { would_execute: threat_score >= threshold };
    }
    if threat_score < threshold {
        return PolicyDecision::Skipped {
            reason: SkipReason::BelowThreshold,
            threat_score,
            threshold,
        };
    }
    PolicyDecision::Proceed
}

/// Gate bound to the configuration read at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyGate {
    enforcement_enabled: bool,
    threshold: i64,
}

impl Default for PolicyGate {
    fn default() -> Self {
        Self { enforcement_enabled: false, threshold: DEFAULT_THREAT_SCORE_THRESHOLD }
    }
}

impl PolicyGate {
    pub fn new(enforcement_enabled: bool, threshold: i64) -> Self {
        Self { enforcement_enabled, threshold }
    }

    pub fn decide(&self, threat_score: i64) -> PolicyDecision {
        decide(threat_score, self.enforcement_enabled, self.threshold)
    }

    pub fn enforcement_enabled(&self) -> bool {
        self.enforcement_enabled
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }
}
