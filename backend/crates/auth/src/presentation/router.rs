//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create an Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::sign_in::<R>))
        .route("/logout", post(handlers::sign_out::<R>))
        .route("/refresh-token", post(handlers::refresh_token::<R>))
        .route("/biometric-login", post(handlers::biometric_sign_in::<R>))
        .route("/add-biometric", post(handlers::add_biometric::<R>))
        .route("/remove-biometric", post(handlers::remove_biometric::<R>))
        .route(
            "/biometric-status/{email}",
            get(handlers::biometric_status::<R>),
        )
        .with_state(state)
}
