//! Token Issuance and Verification
//!
//! Every successful authentication event issues a triad of independently
//! signed, independently expiring JWTs: a short-lived access token, a
//! long-lived refresh token, and a legacy token kept for older clients.
//! Issuance has no side effects; apart from the random token identifier it
//! is a function only of the claims, the clock value passed in and the
//! configured secrets.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::{email::Email, user_id::UserId};

/// Token kinds, each with its own secret and validity window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
    Legacy,
}

impl TokenKind {
    /// Validity window for this kind
    pub fn ttl(&self) -> Duration {
        match self {
            TokenKind::Access => Duration::minutes(15),
            TokenKind::Refresh => Duration::days(7),
            TokenKind::Legacy => Duration::hours(24),
        }
    }
}

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Account email
    pub email: String,
    /// Token identifier. Makes every issued token unique, so a rotated
    /// refresh token can never collide with its replacement even when both
    /// were signed within the same second.
    pub jti: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// A signed token together with its kind and expiry
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub kind: TokenKind,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The three tokens issued together on every successful authentication
#[derive(Debug, Clone)]
pub struct TokenTriad {
    pub access: SignedToken,
    pub refresh: SignedToken,
    pub legacy: SignedToken,
}

/// Token signing/verification errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Expired, malformed and tampered tokens all land here; callers do not
    /// surface the distinction.
    #[error("Token verification failed: {0}")]
    Verification(jsonwebtoken::errors::Error),
}

/// Issues and verifies the token triad (HS256, one secret per kind)
#[derive(Clone)]
pub struct TokenIssuer {
    access_secret: String,
    refresh_secret: String,
    legacy_secret: String,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            legacy_secret: config.legacy_token_secret.clone(),
        }
    }

    fn secret(&self, kind: TokenKind) -> &[u8] {
        match kind {
            TokenKind::Access => self.access_secret.as_bytes(),
            TokenKind::Refresh => self.refresh_secret.as_bytes(),
            TokenKind::Legacy => self.legacy_secret.as_bytes(),
        }
    }

    /// Sign one token of the given kind for the given subject
    pub fn issue(
        &self,
        kind: TokenKind,
        user_id: &UserId,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, TokenError> {
        let expires_at = now + kind.ttl();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.as_str().to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret(kind)),
        )
        .map_err(TokenError::Signing)?;

        Ok(SignedToken {
            kind,
            token,
            expires_at,
        })
    }

    /// Issue the full triad for the given subject
    pub fn issue_triad(
        &self,
        user_id: &UserId,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<TokenTriad, TokenError> {
        Ok(TokenTriad {
            access: self.issue(TokenKind::Access, user_id, email, now)?,
            refresh: self.issue(TokenKind::Refresh, user_id, email, now)?,
            legacy: self.issue(TokenKind::Legacy, user_id, email, now)?,
        })
    }

    /// Verify signature and expiry under the given kind's secret
    pub fn verify(&self, kind: TokenKind, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret(kind)),
            &Validation::default(),
        )
        .map_err(TokenError::Verification)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        let config = AuthConfig::new(
            Email::new("admin@example.com").unwrap(),
            "admin-password",
            "access-secret",
            "refresh-secret",
            "legacy-secret",
        );
        TokenIssuer::new(&config)
    }

    fn subject() -> (UserId, Email) {
        (UserId::new(), Email::new("user@example.com").unwrap())
    }

    #[test]
    fn test_issue_and_verify_roundtrip_per_kind() {
        let issuer = issuer();
        let (user_id, email) = subject();
        let now = Utc::now();

        for kind in [TokenKind::Access, TokenKind::Refresh, TokenKind::Legacy] {
            let signed = issuer.issue(kind, &user_id, &email, now).unwrap();
            let claims = issuer.verify(kind, &signed.token).unwrap();
            assert_eq!(claims.sub, user_id.to_string());
            assert_eq!(claims.email, email.as_str());
            assert_eq!(claims.exp, (now + kind.ttl()).timestamp());
        }
    }

    #[test]
    fn test_kinds_are_not_interchangeable() {
        let issuer = issuer();
        let (user_id, email) = subject();
        let now = Utc::now();

        let access = issuer.issue(TokenKind::Access, &user_id, &email, now).unwrap();
        assert!(issuer.verify(TokenKind::Refresh, &access.token).is_err());
        assert!(issuer.verify(TokenKind::Legacy, &access.token).is_err());

        let refresh = issuer.issue(TokenKind::Refresh, &user_id, &email, now).unwrap();
        assert!(issuer.verify(TokenKind::Access, &refresh.token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issuer = issuer();
        let (user_id, email) = subject();

        // Refresh tokens live 7 days; issue one 8 days in the past
        let then = Utc::now() - Duration::days(8);
        let signed = issuer.issue(TokenKind::Refresh, &user_id, &email, then).unwrap();

        assert!(issuer.verify(TokenKind::Refresh, &signed.token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let issuer = issuer();
        assert!(issuer.verify(TokenKind::Refresh, "not.a.jwt").is_err());
        assert!(issuer.verify(TokenKind::Refresh, "").is_err());
    }

    #[test]
    fn test_triad_expiry_windows() {
        let issuer = issuer();
        let (user_id, email) = subject();
        let now = Utc::now();

        let triad = issuer.issue_triad(&user_id, &email, now).unwrap();
        assert_eq!(triad.access.expires_at, now + Duration::minutes(15));
        assert_eq!(triad.refresh.expires_at, now + Duration::days(7));
        assert_eq!(triad.legacy.expires_at, now + Duration::hours(24));

        // Three distinct tokens
        assert_ne!(triad.access.token, triad.refresh.token);
        assert_ne!(triad.access.token, triad.legacy.token);
        assert_ne!(triad.refresh.token, triad.legacy.token);
    }

    #[test]
    fn test_reissue_never_collides() {
        let issuer = issuer();
        let (user_id, email) = subject();
        let now = Utc::now();

        // Same subject, same kind, same clock value: the jti still makes
        // the tokens distinct, so rotation can tell old from new.
        let first = issuer.issue(TokenKind::Refresh, &user_id, &email, now).unwrap();
        let second = issuer.issue(TokenKind::Refresh, &user_id, &email, now).unwrap();
        assert_ne!(first.token, second.token);
    }
}
