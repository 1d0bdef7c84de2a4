//! User Entity
//!
//! Identity and session record. One row per account; the refresh-token
//! field is a single slot, so at most one session is live per account and
//! installing a new token invalidates the previous one.
//!
//! Invariants maintained by the transition methods:
//! - `biometric_enabled` is true exactly when a digest is present
//! - `biometric_registered_at` is set once, on the absent-to-present digest
//!   transition, and cleared whenever the digest is cleared

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    biometric_digest::BiometricDigest, email::Email, user_id::UserId,
    user_password::PasswordDigest, user_role::UserRole,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, store-assigned and immutable
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Email, unique across the store
    pub email: Email,
    /// One-way password digest
    pub password_digest: PasswordDigest,
    /// Role, assigned at creation
    pub role: UserRole,
    /// Whether a biometric credential is enrolled
    pub biometric_enabled: bool,
    /// Enrolled biometric digest
    pub biometric_digest: Option<BiometricDigest>,
    /// First enrollment time; survives re-enrollment
    pub biometric_registered_at: Option<DateTime<Utc>>,
    /// Single-slot refresh token; presence denotes an active session
    pub refresh_token: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with no biometric credential and no session
    pub fn new(
        name: impl Into<String>,
        email: Email,
        password_digest: PasswordDigest,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            name: name.into(),
            email,
            password_digest,
            role,
            biometric_enabled: false,
            biometric_digest: None,
            biometric_registered_at: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Enroll (or re-enroll) a biometric credential.
    ///
    /// Overwrites any existing digest; re-enrollment keeps the original
    /// registration time. Single credential only.
    pub fn enroll_biometric(&mut self, digest: BiometricDigest) {
        let now = Utc::now();
        if self.biometric_registered_at.is_none() {
            self.biometric_registered_at = Some(now);
        }
        self.biometric_digest = Some(digest);
        self.biometric_enabled = true;
        self.updated_at = now;
    }

    /// Remove the biometric credential. Idempotent.
    pub fn remove_biometric(&mut self) {
        self.biometric_digest = None;
        self.biometric_enabled = false;
        self.biometric_registered_at = None;
        self.updated_at = Utc::now();
    }

    /// Install a refresh token, replacing (and thereby invalidating) any
    /// previous one.
    pub fn install_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
        self.updated_at = Utc::now();
    }

    /// Clear the refresh token slot. Idempotent.
    pub fn revoke_refresh_token(&mut self) {
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }
}
