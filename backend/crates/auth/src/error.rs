//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. This is the single place where domain
//! failures are mapped to user-facing status codes and messages; in
//! particular, password-login failures collapse into one generic message so
//! the response never reveals whether the account exists.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required request fields are missing
    #[error("{0}")]
    MissingFields(&'static str),

    /// Malformed input (bad email, unparseable user id)
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("User already exists, you can login")]
    EmailTaken,

    /// Generic credential mismatch for password login. Covers unknown
    /// account, wrong password and corrupted stored digest alike.
    #[error("Auth failed: email or password is wrong")]
    InvalidCredentials,

    /// User lookup failed in a non-login path
    #[error("User not found")]
    UserNotFound,

    /// Biometric login for an email with no record. Unlike password login
    /// this path reports the miss distinctly, as the original service did.
    #[error("User not found")]
    BiometricUnknownUser,

    /// Biometric login without an enrolled credential
    #[error("Biometric authentication not enabled for this user")]
    BiometricNotEnabled,

    /// Biometric assertion did not match the enrolled digest
    #[error("Biometric authentication failed")]
    BiometricFailed,

    /// Refresh endpoint called without a token
    #[error("Refresh token is required")]
    MissingRefreshToken,

    /// Refresh token failed verification or no longer matches the stored
    /// slot. Expired, tampered and rotated tokens are indistinguishable.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (signing failure, corrupted record)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingFields(_) | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::BiometricUnknownUser
            | AuthError::BiometricNotEnabled
            | AuthError::BiometricFailed
            | AuthError::InvalidRefreshToken => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::MissingRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields(_) | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::BiometricUnknownUser
            | AuthError::BiometricNotEnabled
            | AuthError::BiometricFailed
            | AuthError::InvalidRefreshToken => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::MissingRefreshToken => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server errors get a generic user-facing message;
    /// the detail stays in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::BiometricFailed => {
                tracing::warn!("Biometric assertion mismatch");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Refresh token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_contract() {
        assert_eq!(
            AuthError::MissingFields("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::BiometricUnknownUser.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::MissingRefreshToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidRefreshToken.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_server_errors_stay_generic() {
        let err = AuthError::Internal("signing key rejected".to_string());
        let app_err = err.to_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert_eq!(app_err.message(), "Internal server error");
        assert!(!app_err.message().contains("signing"));
    }

    #[test]
    fn test_login_failure_message_is_generic() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Auth failed: email or password is wrong"
        );
    }
}
