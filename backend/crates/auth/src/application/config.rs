//! Application Configuration
//!
//! Configuration for the auth application layer. Built once at startup and
//! injected into the use cases; nothing in this crate reads the environment.

use std::fmt;

use crate::domain::value_object::email::Email;

/// Auth application configuration
///
/// Missing or empty secrets are a startup-fatal condition enforced by the
/// binary when it builds this value, never a per-request error.
#[derive(Clone)]
pub struct AuthConfig {
    /// Email that receives the Admin role on signup, and the identity of
    /// the lazily bootstrapped admin account
    pub admin_email: Email,
    /// Password accepted for the admin bootstrap login
    pub admin_password: String,
    /// Signing secret for access tokens (15 minutes)
    pub access_token_secret: String,
    /// Signing secret for refresh tokens (7 days)
    pub refresh_token_secret: String,
    /// Signing secret for legacy tokens (24 hours, older-client compatibility)
    pub legacy_token_secret: String,
}

impl AuthConfig {
    pub fn new(
        admin_email: Email,
        admin_password: impl Into<String>,
        access_token_secret: impl Into<String>,
        refresh_token_secret: impl Into<String>,
        legacy_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            admin_email,
            admin_password: admin_password.into(),
            access_token_secret: access_token_secret.into(),
            refresh_token_secret: refresh_token_secret.into(),
            legacy_token_secret: legacy_token_secret.into(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("legacy_token_secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::new(
            Email::new("admin@example.com").unwrap(),
            "admin-password",
            "access-secret",
            "refresh-secret",
            "legacy-secret",
        );
        let debug = format!("{:?}", config);
        assert!(debug.contains("admin@example.com"));
        assert!(!debug.contains("admin-password"));
        assert!(!debug.contains("access-secret"));
    }
}
