//! Application Layer
//!
//! Use cases, configuration and token issuance.

pub mod biometric_enroll;
pub mod biometric_sign_in;
pub mod config;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod tokens;

// Re-exports
pub use biometric_enroll::{BiometricEnrollUseCase, BiometricStatusOutput};
pub use biometric_sign_in::{BiometricSignInInput, BiometricSignInUseCase};
pub use config::AuthConfig;
pub use refresh::{RefreshOutput, RefreshUseCase};
pub use sign_in::{AuthenticatedOutput, SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use tokens::{Claims, SignedToken, TokenIssuer, TokenKind, TokenTriad};
