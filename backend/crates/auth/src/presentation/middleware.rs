//! Auth Middleware
//!
//! Bearer-token middleware for protecting downstream routers. Accepts an
//! access token, falling back to the legacy 24h token so older clients keep
//! working.

use axum::Json;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenIssuer, TokenKind};

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub config: Arc<AuthConfig>,
}

/// Decoded identity stored in request extensions for downstream handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    state: AuthMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = bearer_token(req.headers()) else {
        return Err(unauthorized("Authentication required"));
    };

    let issuer = TokenIssuer::new(&state.config);

    // Access token first; legacy token for older clients
    let claims = issuer
        .verify(TokenKind::Access, &token)
        .or_else(|_| issuer.verify(TokenKind::Legacy, &token))
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "message": message,
            "success": false,
        })),
    )
        .into_response()
}
