//! Sign Up Use Case
//!
//! Creates a new user account, optionally enrolling a biometric credential
//! in the same step, and starts its first session.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::sign_in::AuthenticatedOutput;
use crate::application::tokens::TokenIssuer;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    biometric_digest::BiometricDigest,
    email::Email,
    user_password::{PasswordDigest, RawPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Raw biometric assertion to enroll at signup, if any
    pub biometric_assertion: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    issuer: TokenIssuer,
}

impl<R> SignUpUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let issuer = TokenIssuer::new(&config);
        Self {
            repo,
            config,
            issuer,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AuthenticatedOutput> {
        let email = Email::new(&input.email)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let raw = RawPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let digest =
            PasswordDigest::from_raw(&raw).map_err(|e| AuthError::Internal(e.to_string()))?;

        // Admin iff the signup email matches the configured admin address
        let role = if email == self.config.admin_email {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let mut user = User::new(input.name, email, digest, role);

        if let Some(assertion) = &input.biometric_assertion {
            user.enroll_biometric(BiometricDigest::from_assertion(assertion));
        }

        let tokens = self
            .issuer
            .issue_triad(&user.user_id, &user.email, Utc::now())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        user.install_refresh_token(tokens.refresh.token.clone());
        self.repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            biometric_enabled = user.biometric_enabled,
            "User signed up"
        );

        Ok(AuthenticatedOutput { tokens, user })
    }
}
