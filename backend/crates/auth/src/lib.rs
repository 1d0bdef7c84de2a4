//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases, configuration, token issuance
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User signup/login with email + password
//! - Lazy admin bootstrap from configured credentials
//! - Biometric login and single-credential enrollment
//! - JWT token triad (access / refresh / legacy) with refresh rotation
//! - Single active session per account (single-slot refresh token)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, zeroized in memory
//! - Password-login failures are enumeration-resistant (one generic error)
//! - Refresh tokens are single use; rotation invalidates the prior token
//! - The biometric digest is an unsalted SHA-256 of the assertion: it acts
//!   as a static shared secret and is not a hardened biometric protocol

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
