//! Directory client trait.

use async_trait::async_trait;

use super::error::Result;

/// Account-level actions the remediation engine takes against a directory service.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Invalidate every refresh token and session cookie issued to `user_id`.
    async fn revoke_sessions(&self, user_id: &str) -> Result<()>;

    /// Require a password change at next sign-in, optionally behind MFA.
    async fn set_force_password_reset(
        &self,
        user_id: &str,
        require_mfa_on_next_sign_in: bool,
    ) -> Result<()>;
}
