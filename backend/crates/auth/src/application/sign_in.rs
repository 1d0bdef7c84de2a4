//! Sign In Use Case
//!
//! Password login with lazy admin bootstrap. Every failure on this path
//! collapses into the same generic error so a caller cannot tell an unknown
//! email from a wrong password.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::constant_time_eq;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenIssuer, TokenTriad};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{PasswordDigest, RawPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Output shared by every flow that authenticates a user: the freshly
/// issued triad plus the profile it belongs to.
#[derive(Debug)]
pub struct AuthenticatedOutput {
    pub tokens: TokenTriad,
    pub user: User,
}

/// Result of resolving a login email against the store
enum ResolvedAccount {
    /// A record exists; verify the password against it
    Found(Box<User>),
    /// No record, but the credentials match the configured admin bootstrap
    /// pair; synthesize the admin account
    BootstrapAdmin,
    /// No record and not a bootstrap match
    NotFound,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    issuer: TokenIssuer,
}

impl<R> SignInUseCase<R>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<AuthenticatedOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let (mut user, is_new) = match self.resolve_or_bootstrap(&email, &input.password).await? {
            ResolvedAccount::Found(user) => {
                let user = *user;
                let raw = RawPassword::new_unchecked(input.password);
                match user.password_digest.verify(&raw) {
                    Ok(true) => {}
                    Ok(false) => return Err(AuthError::InvalidCredentials),
                    Err(e) => {
                        // Corrupted stored digest; indistinguishable from a
                        // wrong password on the wire
                        tracing::error!(user_id = %user.user_id, error = %e, "Stored password digest is malformed");
                        return Err(AuthError::InvalidCredentials);
                    }
                }
                (user, false)
            }
            ResolvedAccount::BootstrapAdmin => (self.bootstrap_admin(&email)?, true),
            ResolvedAccount::NotFound => return Err(AuthError::InvalidCredentials),
        };

        let tokens = self
            .issuer
            .issue_triad(&user.user_id, &user.email, Utc::now())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        user.install_refresh_token(tokens.refresh.token.clone());
        if is_new {
            self.repo.create(&user).await?;
        } else {
            self.repo.update(&user).await?;
        }

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            bootstrapped = is_new,
            "User signed in"
        );

        Ok(AuthenticatedOutput { tokens, user })
    }

    /// Resolve the email against the store, falling back to the admin
    /// bootstrap pair when no record exists.
    async fn resolve_or_bootstrap(
        &self,
        email: &Email,
        password: &str,
    ) -> AuthResult<ResolvedAccount> {
        if let Some(user) = self.repo.find_by_email(email).await? {
            return Ok(ResolvedAccount::Found(Box::new(user)));
        }

        let is_bootstrap = email == &self.config.admin_email
            && constant_time_eq(password.as_bytes(), self.config.admin_password.as_bytes());

        if is_bootstrap {
            Ok(ResolvedAccount::BootstrapAdmin)
        } else {
            Ok(ResolvedAccount::NotFound)
        }
    }

    /// Materialize the admin account from the configured credentials.
    fn bootstrap_admin(&self, email: &Email) -> AuthResult<User> {
        let raw = RawPassword::new_unchecked(self.config.admin_password.clone());
        let digest =
            PasswordDigest::from_raw(&raw).map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User::new(
            "Admin User",
            email.clone(),
            digest,
            UserRole::Admin,
        ))
    }
}
