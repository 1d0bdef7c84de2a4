//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    BiometricEnrollUseCase, BiometricSignInInput, BiometricSignInUseCase, RefreshUseCase,
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AddBiometricRequest, AuthResponse, BiometricSignInRequest, BiometricStatusResponse,
    BiometricToggleResponse, RefreshRequest, RefreshResponse, RemoveBiometricRequest,
    SignInRequest, SignOutRequest, SignOutResponse, SignUpRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
        biometric_assertion: req.biometric_data,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::from_output("Signup successful", output)),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(AuthResponse::from_output("Login Success", output)))
}

// ============================================================================
// Biometric Sign In
// ============================================================================

/// POST /api/auth/biometric-login
pub async fn biometric_sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<BiometricSignInRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let (Some(email), Some(assertion)) = (req.email, req.biometric_data) else {
        return Err(AuthError::MissingFields(
            "Email and biometric data are required",
        ));
    };

    let use_case = BiometricSignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(BiometricSignInInput { email, assertion })
        .await?;

    Ok(Json(AuthResponse::from_output(
        "Biometric Login Success",
        output,
    )))
}

// ============================================================================
// Biometric Enrollment
// ============================================================================

/// POST /api/auth/add-biometric
pub async fn add_biometric<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<AddBiometricRequest>,
) -> AuthResult<Json<BiometricToggleResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let (Some(user_id), Some(assertion)) = (req.user_id, req.biometric_data) else {
        return Err(AuthError::MissingFields(
            "User ID and biometric data are required",
        ));
    };

    let use_case = BiometricEnrollUseCase::new(state.repo.clone());
    use_case.enroll(&user_id, &assertion).await?;

    Ok(Json(BiometricToggleResponse {
        message: "Biometric added successfully".to_string(),
        success: true,
        biometric_enabled: true,
    }))
}

/// POST /api/auth/remove-biometric
pub async fn remove_biometric<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RemoveBiometricRequest>,
) -> AuthResult<Json<BiometricToggleResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Some(user_id) = req.user_id else {
        return Err(AuthError::MissingFields("User ID is required"));
    };

    let use_case = BiometricEnrollUseCase::new(state.repo.clone());
    use_case.remove(&user_id).await?;

    Ok(Json(BiometricToggleResponse {
        message: "Biometric removed successfully".to_string(),
        success: true,
        biometric_enabled: false,
    }))
}

/// GET /api/auth/biometric-status/{email}
pub async fn biometric_status<R>(
    State(state): State<AuthAppState<R>>,
    Path(email): Path<String>,
) -> AuthResult<Json<BiometricStatusResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = BiometricEnrollUseCase::new(state.repo.clone());
    let output = use_case.status(&email).await?;

    Ok(Json(BiometricStatusResponse {
        success: true,
        biometric_enabled: output.biometric_enabled,
        email: output.email,
        name: output.name,
    }))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh-token
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RefreshRequest>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Some(presented) = req.refresh_token else {
        return Err(AuthError::MissingRefreshToken);
    };

    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(&presented).await?;

    Ok(Json(RefreshResponse {
        success: true,
        access_token: output.tokens.access.token,
        refresh_token: output.tokens.refresh.token,
        jwt_token: output.tokens.legacy.token,
        user_id: output.user_id,
    }))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/logout
///
/// Always succeeds; an unknown or already-cleared token is a no-op.
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignOutRequest>,
) -> AuthResult<Json<SignOutResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = req.refresh_token {
        let use_case = SignOutUseCase::new(state.repo.clone());
        use_case.execute(&token).await?;
    }

    Ok(Json(SignOutResponse {
        message: "Logged out successfully".to_string(),
        success: true,
    }))
}
