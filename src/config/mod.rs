//! # Configuration Management
//!
//! Service configuration is read once at startup from the process environment.
//! Parsing goes through a lookup function so it can be exercised without
//! touching the real environment.

pub mod settings;

pub use settings::{
    ApiServerConfig, AuditConfig, LogFormat, ObservabilityConfig, RemediationConfig,
};

use std::str::FromStr;
use validator::Validate;

use crate::errors::{Error, Result};
use crate::identity::{DirectoryConfig, DEFAULT_DIRECTORY_URL};
use crate::remediation::{AuditFailureMode, DEFAULT_THREAT_SCORE_THRESHOLD};
use crate::secrets::{SecretString, VaultConfig, DEFAULT_OWNER_TAG};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiServerConfig,
    pub remediation: RemediationConfig,
    pub vault: VaultConfig,
    pub directory: DirectoryConfig,
    pub audit: AuditConfig,
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let remediation = RemediationConfig {
            enable_auto_remediation: var("ENABLE_AUTO_REMEDIATION")
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            threat_score_threshold: parse_or(
                "THREAT_SCORE_THRESHOLD",
                var("THREAT_SCORE_THRESHOLD"),
                DEFAULT_THREAT_SCORE_THRESHOLD,
            )?,
            audit_failure_mode: parse_or(
                "REMEDIATION_AUDIT_FAILURE_MODE",
                var("REMEDIATION_AUDIT_FAILURE_MODE"),
                AuditFailureMode::default(),
            )?,
        };

        let vault = VaultConfig {
            address: var("VAULT_ADDR").ok_or_else(|| Error::config("VAULT_ADDR is required"))?,
            token: var("VAULT_TOKEN"),
            namespace: var("VAULT_NAMESPACE"),
            mount_path: var("VAULT_MOUNT_PATH").unwrap_or_else(|| "secret".to_string()),
            owner_tag: var("SECRET_OWNER_TAG").unwrap_or_else(|| DEFAULT_OWNER_TAG.to_string()),
        };

        let directory = DirectoryConfig {
            base_url: var("DIRECTORY_API_URL").unwrap_or_else(|| DEFAULT_DIRECTORY_URL.to_string()),
            access_token: var("DIRECTORY_ACCESS_TOKEN").map(SecretString::new),
            timeout_seconds: parse_or(
                "DIRECTORY_TIMEOUT_SECONDS",
                var("DIRECTORY_TIMEOUT_SECONDS"),
                DirectoryConfig::default().timeout_seconds,
            )?,
        };

        let audit = AuditConfig {
            webhook_url: var("AUDIT_WEBHOOK_URL"),
            webhook_secret: var("AUDIT_WEBHOOK_SECRET").map(SecretString::new),
            ..AuditConfig::default()
        };

        let api_defaults = ApiServerConfig::default();
        let api = ApiServerConfig {
            bind_address: var("API_BIND_ADDRESS").unwrap_or(api_defaults.bind_address),
            port: parse_or("API_PORT", var("API_PORT"), api_defaults.port)?,
        };

        let observability_defaults = ObservabilityConfig::default();
        let observability = ObservabilityConfig {
            enable_metrics: var("ENABLE_METRICS")
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            metrics_port: parse_or(
                "METRICS_PORT",
                var("METRICS_PORT"),
                observability_defaults.metrics_port,
            )?,
            log_level: var("LOG_LEVEL").unwrap_or(observability_defaults.log_level),
            log_format: parse_or("LOG_FORMAT", var("LOG_FORMAT"), observability_defaults.log_format)?,
            service_name: observability_defaults.service_name,
        };

        let config = Self { api, remediation, vault, directory, audit, observability };
        config.validate()?;
        Ok(config)
    }

    /// Validate the sections that carry field rules.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::config(format!("Invalid {} '{}': {}", name, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_vault_address() {
        let config = Config::from_lookup(lookup(&[("VAULT_ADDR", "http://vault:8200")])).unwrap();

        assert!(!config.remediation.enable_auto_remediation);
        assert_eq!(config.remediation.threat_score_threshold, 70);
        assert_eq!(config.remediation.audit_failure_mode, AuditFailureMode::Fail);
        assert_eq!(config.vault.address, "http://vault:8200");
        assert_eq!(config.vault.mount_path, "secret");
        assert_eq!(config.vault.owner_tag, "owner");
        assert_eq!(config.directory.base_url, DEFAULT_DIRECTORY_URL);
        assert_eq!(config.directory.timeout_seconds, 30);
        assert!(config.audit.webhook().is_none());
        assert_eq!(config.api.socket_address(), "0.0.0.0:8080");
        assert_eq!(config.observability.log_format, LogFormat::Text);
        assert!(!config.observability.enable_metrics);
    }

    #[test]
    fn test_vault_address_is_required() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("VAULT_ADDR")));
    }

    #[test]
    fn test_full_environment() {
        let config = Config::from_lookup(lookup(&[
            ("VAULT_ADDR", "https://vault.internal:8200"),
            ("VAULT_TOKEN", "s.token"),
            ("VAULT_MOUNT_PATH", "kv"),
            ("SECRET_OWNER_TAG", "owned_by"),
            ("THREAT_SCORE_THRESHOLD", "85"),
            ("ENABLE_AUTO_REMEDIATION", "TRUE"),
            ("REMEDIATION_AUDIT_FAILURE_MODE", "warn"),
            ("DIRECTORY_API_URL", "http://directory.test/v1.0"),
            ("DIRECTORY_TIMEOUT_SECONDS", "5"),
            ("AUDIT_WEBHOOK_URL", "https://collector.test/audit"),
            ("API_PORT", "9000"),
            ("LOG_FORMAT", "json"),
            ("ENABLE_METRICS", "true"),
            ("METRICS_PORT", "0"),
        ]))
        .unwrap();

        let gate = config.remediation.policy_gate();
        assert!(gate.enforcement_enabled());
        assert_eq!(gate.threshold(), 85);
        assert_eq!(config.remediation.audit_failure_mode, AuditFailureMode::Warn);
        assert_eq!(config.vault.token.as_deref(), Some("s.token"));
        assert_eq!(config.vault.mount_path, "kv");
        assert_eq!(config.vault.owner_tag, "owned_by");
        assert_eq!(config.directory.base_url, "http://directory.test/v1.0");
        assert_eq!(config.directory.timeout_seconds, 5);
        assert!(config.audit.webhook().is_some());
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.metrics_bind_address(), None);
    }

    #[test]
    fn test_enforcement_requires_literal_true() {
        for value in ["1", "yes", "on", "false", "enabled"] {
            let config = Config::from_lookup(lookup(&[
                ("VAULT_ADDR", "http://vault:8200"),
                ("ENABLE_AUTO_REMEDIATION", value),
            ]))
            .unwrap();
            assert!(!config.remediation.enable_auto_remediation, "value {value} enabled enforcement");
        }
    }

    #[test]
    fn test_unparsable_threshold_is_config_error() {
        let err = Config::from_lookup(lookup(&[
            ("VAULT_ADDR", "http://vault:8200"),
            ("THREAT_SCORE_THRESHOLD", "high"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("THREAT_SCORE_THRESHOLD")));
    }

    #[test]
    fn test_unknown_audit_failure_mode_is_config_error() {
        let err = Config::from_lookup(lookup(&[
            ("VAULT_ADDR", "http://vault:8200"),
            ("REMEDIATION_AUDIT_FAILURE_MODE", "ignore"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_port_zero_fails_validation() {
        let err = Config::from_lookup(lookup(&[
            ("VAULT_ADDR", "http://vault:8200"),
            ("API_PORT", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
