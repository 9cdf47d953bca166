//! Audit sink that POSTs remediation records to an HTTP collector.
//!
//! When a signing secret is configured the body is signed with HMAC-SHA256 and
//! the signature sent as `X-Remediation-Signature: sha256=<hex>`. Delivery is
//! attempted once; a failure is returned to the caller.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

use super::error::{AuditError, Result};
use super::sink::{AuditRecord, AuditSink};
use crate::secrets::SecretString;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "X-Remediation-Signature";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone)]
pub struct WebhookAuditConfig {
    pub url: String,
    pub signing_secret: Option<SecretString>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct WebhookAuditSink {
    client: reqwest::Client,
    url: String,
    signing_secret: Option<SecretString>,
}

impl WebhookAuditSink {
    pub fn new(config: WebhookAuditConfig) -> Result<Self> {
        url::Url::parse(&config.url).map_err(|e| {
            AuditError::config_error(format!("Invalid audit webhook URL '{}': {}", config.url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AuditError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url: config.url, signing_secret: config.signing_secret })
    }

    fn sign(secret: &SecretString, body: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|e| AuditError::config_error(format!("Invalid audit signing secret: {}", e)))?;
        mac.update(body);
        Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
    }
}

#[async_trait]
impl AuditSink for WebhookAuditSink {
    async fn record(&self, user_id: &str, incident_id: Option<&str>, actions: &[String]) -> Result<()> {
        let record = AuditRecord::new(user_id, incident_id, actions);
        let body = serde_json::to_vec(&record)?;

        let mut request = self.client.post(&self.url).header("Content-Type", "application/json");
        if let Some(secret) = &self.signing_secret {
            request = request.header(SIGNATURE_HEADER, Self::sign(secret, &body)?);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| AuditError::delivery_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status_code = status.as_u16(),
                user_id = %user_id,
                "Audit endpoint rejected remediation record"
            );
            return Err(AuditError::Rejected { status: status.as_u16() });
        }

        tracing::info!(user_id = %user_id, incident_id = ?incident_id, "Remediation record delivered");
        Ok(())
    }
}
