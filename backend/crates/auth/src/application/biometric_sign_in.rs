//! Biometric Sign In Use Case
//!
//! Login with a biometric assertion instead of a password. Unlike password
//! login this path reports its failures distinctly (unknown user, not
//! enrolled, mismatch), matching the observed behavior of the service this
//! replaces.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::sign_in::AuthenticatedOutput;
use crate::application::tokens::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{biometric_digest::BiometricDigest, email::Email};
use crate::error::{AuthError, AuthResult};

/// Biometric sign in input
pub struct BiometricSignInInput {
    pub email: String,
    /// Raw biometric assertion from the client
    pub assertion: String,
}

/// Biometric sign in use case
pub struct BiometricSignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    issuer: TokenIssuer,
}

impl<R> BiometricSignInUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let issuer = TokenIssuer::new(&config);
        Self { repo, issuer }
    }

    pub async fn execute(&self, input: BiometricSignInInput) -> AuthResult<AuthenticatedOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::BiometricUnknownUser)?;

        let mut user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::BiometricUnknownUser)?;

        if !user.biometric_enabled {
            return Err(AuthError::BiometricNotEnabled);
        }
        let Some(stored) = user.biometric_digest.clone() else {
            return Err(AuthError::BiometricNotEnabled);
        };

        let presented = BiometricDigest::from_assertion(&input.assertion);
        if presented != stored {
            return Err(AuthError::BiometricFailed);
        }

        let tokens = self
            .issuer
            .issue_triad(&user.user_id, &user.email, Utc::now())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        user.install_refresh_token(tokens.refresh.token.clone());
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed in with biometric");

        Ok(AuthenticatedOutput { tokens, user })
    }
}
