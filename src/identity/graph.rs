//! Microsoft Graph directory client.
//!
//! - Session revocation: `POST {base}/users/{id}/revokeSignInSessions`
//! - Forced reset: `PATCH {base}/users/{id}` with a `passwordProfile` body
//!
//! Token acquisition is not handled here; a bearer token is supplied through
//! configuration (`DIRECTORY_ACCESS_TOKEN`).

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use url::Url;

use super::client::IdentityClient;
use super::error::{IdentityError, Result};
use crate::secrets::SecretString;

/// Default directory endpoint.
pub const DEFAULT_DIRECTORY_URL: &str = "https://graph.microsoft.com/v1.0";

/// Directory client configuration.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL of the directory API, version segment included
    pub base_url: String,

    /// Bearer token sent on every request
    pub access_token: Option<SecretString>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_DIRECTORY_URL.to_string(), access_token: None, timeout_seconds: 30 }
    }
}

/// [`IdentityClient`] backed by the Graph REST API.
#[derive(Clone, Debug)]
pub struct GraphIdentityClient {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<SecretString>,
}

impl GraphIdentityClient {
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            IdentityError::config_error(format!("Invalid directory URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(IdentityError::config_error(format!(
                "Directory URL '{}' cannot be used as a base",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| IdentityError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url, access_token: config.access_token })
    }

    /// `{base}/users/{user_id}[/{action}]` with the user id as one encoded segment.
    fn user_url(&self, user_id: &str, action: Option<&str>) -> Result<Url> {
        if user_id.is_empty() {
            return Err(IdentityError::invalid_user_id(user_id, "user id cannot be empty"));
        }
        if user_id == "." || user_id == ".." {
            return Err(IdentityError::invalid_user_id(user_id, "user id cannot be a dot segment"));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                IdentityError::config_error("Directory URL cannot be used as a base")
            })?;
            segments.pop_if_empty().push("users").push(user_id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn check_status(operation: &str, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(IdentityError::unexpected_status(operation, status.as_u16(), body))
    }
}

#[async_trait]
impl IdentityClient for GraphIdentityClient {
    async fn revoke_sessions(&self, user_id: &str) -> Result<()> {
        let url = self.user_url(user_id, Some("revokeSignInSessions"))?;

        let response = self.authorize(self.client.post(url)).send().await.map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Session revocation request failed");
            IdentityError::from(e)
        })?;
        Self::check_status("revokeSignInSessions", response).await?;

        tracing::info!(user_id = %user_id, "Revoked directory sign-in sessions");
        Ok(())
    }

    async fn set_force_password_reset(
        &self,
        user_id: &str,
        require_mfa_on_next_sign_in: bool,
    ) -> Result<()> {
        let url = self.user_url(user_id, None)?;
        let body = json!({
            "passwordProfile": {
                "forceChangePasswordNextSignIn": true,
                "forceChangePasswordNextSignInWithMfa": require_mfa_on_next_sign_in
            }
        });

        let response =
            self.authorize(self.client.patch(url)).json(&body).send().await.map_err(|e| {
                tracing::error!(error = %e, user_id = %user_id, "Password reset request failed");
                IdentityError::from(e)
            })?;
        Self::check_status("updateUser", response).await?;

        tracing::info!(
            user_id = %user_id,
            require_mfa = require_mfa_on_next_sign_in,
            "Forced password reset at next sign-in"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GraphIdentityClient {
        GraphIdentityClient::new(DirectoryConfig { base_url: base.to_string(), ..Default::default() })
            .unwrap()
    }

    #[test]
    fn test_user_url_encodes_single_segment() {
        let client = client("https://graph.example.com/v1.0");
        let url = client.user_url("team/u1", Some("revokeSignInSessions")).unwrap();
        assert_eq!(url.as_str(), "https://graph.example.com/v1.0/users/team%2Fu1/revokeSignInSessions");
    }

    #[test]
    fn test_user_url_tolerates_trailing_slash() {
        let client = client("https://graph.example.com/v1.0/");
        let url = client.user_url("u1", None).unwrap();
        assert_eq!(url.as_str(), "https://graph.example.com/v1.0/users/u1");
    }

    #[test]
    fn test_user_url_rejects_unaddressable_ids() {
        let client = client("https://graph.example.com/v1.0");
        assert!(matches!(client.user_url("", None), Err(IdentityError::InvalidUserId { .. })));
        assert!(matches!(client.user_url("..", None), Err(IdentityError::InvalidUserId { .. })));
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = GraphIdentityClient::new(DirectoryConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(IdentityError::ConfigError { .. })));

        let result = GraphIdentityClient::new(DirectoryConfig {
            base_url: "mailto:ops@example.com".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(IdentityError::ConfigError { .. })));
    }
}
