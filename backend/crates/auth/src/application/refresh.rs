//! Refresh Use Case
//!
//! Rotates the refresh token: a presented token is accepted at most once.
//! Verification failures (expired, malformed, tampered) and slot mismatches
//! (already rotated or revoked) are deliberately indistinguishable to the
//! caller.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::constant_time_eq;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenIssuer, TokenKind, TokenTriad};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshOutput {
    pub tokens: TokenTriad,
    pub user_id: String,
}

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    issuer: TokenIssuer,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let issuer = TokenIssuer::new(&config);
        Self { repo, issuer }
    }

    pub async fn execute(&self, presented: &str) -> AuthResult<RefreshOutput> {
        let claims = self
            .issuer
            .verify(TokenKind::Refresh, presented)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user_id =
            UserId::parse_str(&claims.sub).map_err(|_| AuthError::InvalidRefreshToken)?;

        let mut user = self
            .repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        // The token must still occupy the slot: a rotated or revoked token
        // verifies fine as a JWT but is rejected here (single use).
        let matches_slot = user
            .refresh_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), presented.as_bytes()));
        if !matches_slot {
            return Err(AuthError::InvalidRefreshToken);
        }

        let tokens = self
            .issuer
            .issue_triad(&user.user_id, &user.email, Utc::now())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        user.install_refresh_token(tokens.refresh.token.clone());
        self.repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Refresh token rotated");

        Ok(RefreshOutput {
            tokens,
            user_id: user.user_id.to_string(),
        })
    }
}
