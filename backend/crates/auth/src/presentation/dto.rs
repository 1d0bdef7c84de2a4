//! API DTOs (Data Transfer Objects)
//!
//! Wire shapes are camelCase and every body carries `success` plus, on most
//! endpoints, a human-readable `message`.

use serde::{Deserialize, Serialize};

use crate::application::sign_in::AuthenticatedOutput;

// ============================================================================
// Requests
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Raw biometric assertion to enroll at signup
    pub biometric_data: Option<String>,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Biometric sign in request. Fields are optional so missing input is a 400
/// with a message, not a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSignInRequest {
    pub email: Option<String>,
    pub biometric_data: Option<String>,
}

/// Add biometric request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBiometricRequest {
    pub user_id: Option<String>,
    pub biometric_data: Option<String>,
}

/// Remove biometric request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBiometricRequest {
    pub user_id: Option<String>,
}

/// Refresh request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

/// Sign out request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutRequest {
    pub refresh_token: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Response for every flow that authenticates a user: token triad + profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    /// Legacy 24h token, kept for older clients
    pub jwt_token: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub user_id: String,
    pub biometric_enabled: bool,
}

impl AuthResponse {
    pub fn from_output(message: &str, output: AuthenticatedOutput) -> Self {
        let AuthenticatedOutput { tokens, user } = output;
        Self {
            message: message.to_string(),
            success: true,
            access_token: tokens.access.token,
            refresh_token: tokens.refresh.token,
            jwt_token: tokens.legacy.token,
            name: user.name,
            email: user.email.as_str().to_string(),
            role: user.role.code().to_string(),
            user_id: user.user_id.to_string(),
            biometric_enabled: user.biometric_enabled,
        }
    }
}

/// Refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub jwt_token: String,
    pub user_id: String,
}

/// Response for add/remove biometric
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricToggleResponse {
    pub message: String,
    pub success: bool,
    pub biometric_enabled: bool,
}

/// Biometric status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricStatusResponse {
    pub success: bool,
    pub biometric_enabled: bool,
    pub email: String,
    pub name: String,
}

/// Sign out response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutResponse {
    pub message: String,
    pub success: bool,
}
