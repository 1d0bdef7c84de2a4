//! Sign Out Use Case
//!
//! Clears the refresh-token slot. Always succeeds: presenting an unknown or
//! already-cleared token is a no-op.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> SignOutUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, presented: &str) -> AuthResult<()> {
        if let Some(mut user) = self.repo.find_by_refresh_token(presented).await? {
            user.revoke_refresh_token();
            self.repo.update(&user).await?;

            tracing::info!(user_id = %user.user_id, "User signed out");
        }

        Ok(())
    }
}
