//! Biometric Enrollment Use Case
//!
//! Enroll, remove and inspect the single biometric credential of an
//! account. Enrollment unconditionally overwrites any existing digest;
//! removal is idempotent.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{biometric_digest::BiometricDigest, email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Read-only biometric status projection
#[derive(Debug)]
pub struct BiometricStatusOutput {
    pub biometric_enabled: bool,
    pub email: String,
    pub name: String,
}

/// Biometric enrollment use case
pub struct BiometricEnrollUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> BiometricEnrollUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Enroll a biometric credential for the given user. Re-enrollment
    /// replaces the digest and keeps the original registration time.
    pub async fn enroll(&self, user_id: &str, assertion: &str) -> AuthResult<()> {
        let mut user = self.find_user(user_id).await?;

        user.enroll_biometric(BiometricDigest::from_assertion(assertion));
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Biometric credential enrolled");
        Ok(())
    }

    /// Remove the biometric credential. Succeeds even when none is enrolled.
    pub async fn remove(&self, user_id: &str) -> AuthResult<()> {
        let mut user = self.find_user(user_id).await?;

        user.remove_biometric();
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Biometric credential removed");
        Ok(())
    }

    /// Read-only status lookup by email. Exposes no digest material.
    pub async fn status(&self, email: &str) -> AuthResult<BiometricStatusOutput> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(BiometricStatusOutput {
            biometric_enabled: user.biometric_enabled,
            email: user.email.as_str().to_string(),
            name: user.name,
        })
    }

    async fn find_user(&self, user_id: &str) -> AuthResult<crate::domain::entity::user::User> {
        let user_id = UserId::parse_str(user_id)
            .map_err(|_| AuthError::Validation("Invalid user id".to_string()))?;

        self.repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
