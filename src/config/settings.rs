//! # Configuration Settings
//!
//! Configuration sections for the credential rotator.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::audit::WebhookAuditConfig;
use crate::remediation::{AuditFailureMode, PolicyGate, DEFAULT_THREAT_SCORE_THRESHOLD};
use crate::secrets::SecretString;

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiServerConfig {
    /// Listener bind address
    #[validate(length(min = 1, message = "Bind address cannot be empty"))]
    pub bind_address: String,

    /// Listener port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl ApiServerConfig {
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Policy and engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemediationConfig {
    /// `ENABLE_AUTO_REMEDIATION`; when false every request is a dry run
    pub enable_auto_remediation: bool,

    /// `THREAT_SCORE_THRESHOLD`; scores at or above it are remediated
    pub threat_score_threshold: i64,

    /// `REMEDIATION_AUDIT_FAILURE_MODE`
    pub audit_failure_mode: AuditFailureMode,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            enable_auto_remediation: false,
            threat_score_threshold: DEFAULT_THREAT_SCORE_THRESHOLD,
            audit_failure_mode: AuditFailureMode::Fail,
        }
    }
}

impl RemediationConfig {
    pub fn policy_gate(&self) -> PolicyGate {
        PolicyGate::new(self.enable_auto_remediation, self.threat_score_threshold)
    }
}

/// Audit destination settings
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Collector URL; audit goes to the log when unset
    pub webhook_url: Option<String>,

    /// HMAC signing key for webhook bodies
    pub webhook_secret: Option<SecretString>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { webhook_url: None, webhook_secret: None, timeout_seconds: 10 }
    }
}

impl AuditConfig {
    /// Webhook sink settings, when a collector URL is configured.
    pub fn webhook(&self) -> Option<WebhookAuditConfig> {
        self.webhook_url.as_ref().map(|url| WebhookAuditConfig {
            url: url.clone(),
            signing_secret: self.webhook_secret.clone(),
            timeout_seconds: self.timeout_seconds,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

/// Logging and metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus exporter
    pub enable_metrics: bool,

    /// Metrics server port (0 = disabled)
    pub metrics_port: u16,

    /// Service name attached to metrics
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,

    /// Default log filter (trace, debug, info, warn, error, or directives)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Text or JSON log lines
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            enable_metrics: false,
            metrics_port: 9090,
            service_name: crate::APP_NAME.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ObservabilityConfig {
    /// Get metrics bind address (None if disabled)
    pub fn metrics_bind_address(&self) -> Option<String> {
        if self.metrics_port == 0 {
            None
        } else {
            Some(format!("0.0.0.0:{}", self.metrics_port))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_server_defaults() {
        let config = ApiServerConfig::default();
        assert_eq!(config.socket_address(), "0.0.0.0:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_server_rejects_port_zero() {
        let config = ApiServerConfig { port: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remediation_defaults_are_dry_run() {
        let gate = RemediationConfig::default().policy_gate();
        assert!(!gate.enforcement_enabled());
        assert_eq!(gate.threshold(), 70);
    }

    #[test]
    fn test_audit_webhook_only_when_url_set() {
        assert!(AuditConfig::default().webhook().is_none());

        let config = AuditConfig {
            webhook_url: Some("https://collector.example.com/audit".to_string()),
            webhook_secret: Some(SecretString::new("k")),
            timeout_seconds: 3,
        };
        let webhook = config.webhook().unwrap();
        assert_eq!(webhook.url, "https://collector.example.com/audit");
        assert_eq!(webhook.timeout_seconds, 3);
        assert!(webhook.signing_secret.is_some());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_metrics_bind_address() {
        let mut config = ObservabilityConfig::default();
        assert_eq!(config.metrics_bind_address(), Some("0.0.0.0:9090".to_string()));
        config.metrics_port = 0;
        assert_eq!(config.metrics_bind_address(), None);
    }
}
