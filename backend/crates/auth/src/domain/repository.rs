//! Repository Trait
//!
//! Interface for credential persistence. Implementation is in the
//! infrastructure layer. The store is expected to provide read-your-writes
//! consistency; there is no transaction around the refresh-token update, so
//! two concurrent logins for one account can interleave (the loser's tokens
//! become unusable on the next refresh, which is accepted).

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find the user currently holding this refresh token
    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>>;

    /// Persist changes to an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;
}
