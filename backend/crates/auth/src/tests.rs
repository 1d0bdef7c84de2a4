//! Use-case tests against an in-memory credential store.
//!
//! These exercise the full flows: signup, password login with admin
//! bootstrap, biometric login/enrollment, refresh rotation and logout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::application::{
    BiometricEnrollUseCase, BiometricSignInInput, BiometricSignInUseCase, RefreshUseCase,
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::application::sign_in::AuthenticatedOutput;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory credential store
// ============================================================================

/// HashMap-backed store with the same contract as the Postgres repository,
/// including the unique-email constraint.
#[derive(Clone, Default)]
struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::Internal("duplicate email".to_string()));
        }
        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|u| u.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

const ADMIN_EMAIL: &str = "admin@shop.example";
const ADMIN_PASSWORD: &str = "RootOfAllEvil99!";

fn test_config() -> Arc<AuthConfig> {
    Arc::new(AuthConfig::new(
        Email::new(ADMIN_EMAIL).unwrap(),
        ADMIN_PASSWORD,
        "access-secret",
        "refresh-secret",
        "legacy-secret",
    ))
}

fn store() -> Arc<MemoryUserRepository> {
    Arc::new(MemoryUserRepository::default())
}

async fn sign_up(
    repo: &Arc<MemoryUserRepository>,
    config: &Arc<AuthConfig>,
    email: &str,
    biometric: Option<&str>,
) -> AuthResult<AuthenticatedOutput> {
    SignUpUseCase::new(repo.clone(), config.clone())
        .execute(SignUpInput {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "CorrectHorse9!".to_string(),
            biometric_assertion: biometric.map(str::to_string),
        })
        .await
}

async fn sign_in(
    repo: &Arc<MemoryUserRepository>,
    config: &Arc<AuthConfig>,
    email: &str,
    password: &str,
) -> AuthResult<AuthenticatedOutput> {
    SignInUseCase::new(repo.clone(), config.clone())
        .execute(SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
}

// ============================================================================
// Signup
// ============================================================================

mod sign_up_tests {
    use super::*;

    #[tokio::test]
    async fn assigns_user_role_to_ordinary_email() {
        let (repo, config) = (store(), test_config());

        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        assert_eq!(output.user.role, UserRole::User);
        assert!(!output.user.biometric_enabled);
    }

    #[tokio::test]
    async fn assigns_admin_role_to_admin_email() {
        let (repo, config) = (store(), test_config());

        let output = sign_up(&repo, &config, ADMIN_EMAIL, None).await.unwrap();
        assert_eq!(output.user.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let (repo, config) = (store(), test_config());

        sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        let err = sign_up(&repo, &config, "a@x.com", None).await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn optional_biometric_is_enrolled() {
        let (repo, config) = (store(), test_config());

        let output = sign_up(&repo, &config, "a@x.com", Some("template-1"))
            .await
            .unwrap();
        assert!(output.user.biometric_enabled);
        assert!(output.user.biometric_registered_at.is_some());
    }

    #[tokio::test]
    async fn signup_starts_a_session() {
        let (repo, config) = (store(), test_config());

        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let stored = repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            stored.refresh_token.as_deref(),
            Some(output.tokens.refresh.token.as_str())
        );
    }
}

// ============================================================================
// Password login
// ============================================================================

mod sign_in_tests {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_succeed() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let output = sign_in(&repo, &config, "a@x.com", "CorrectHorse9!")
            .await
            .unwrap();
        assert_eq!(output.user.email.as_str(), "a@x.com");
        assert_eq!(output.user.role, UserRole::User);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_indistinguishable() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let wrong_password = sign_in(&repo, &config, "a@x.com", "WrongPassword1!")
            .await
            .unwrap_err();
        let unknown_email = sign_in(&repo, &config, "nobody@x.com", "CorrectHorse9!")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn second_login_invalidates_first_session() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let first = sign_in(&repo, &config, "a@x.com", "CorrectHorse9!")
            .await
            .unwrap();
        let _second = sign_in(&repo, &config, "a@x.com", "CorrectHorse9!")
            .await
            .unwrap();

        let refresh = RefreshUseCase::new(repo.clone(), config.clone());
        let err = refresh
            .execute(&first.tokens.refresh.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }
}

// ============================================================================
// Admin bootstrap
// ============================================================================

mod bootstrap_tests {
    use super::*;

    #[tokio::test]
    async fn first_admin_login_materializes_the_account() {
        let (repo, config) = (store(), test_config());

        let output = sign_in(&repo, &config, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        assert_eq!(output.user.role, UserRole::Admin);
        assert_eq!(output.user.name, "Admin User");

        // The record now exists in the store
        let stored = repo
            .find_by_email(&Email::new(ADMIN_EMAIL).unwrap())
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn bootstrap_requires_the_exact_password() {
        let (repo, config) = (store(), test_config());

        let err = sign_in(&repo, &config, ADMIN_EMAIL, "NotTheAdminPass1!")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // No record was synthesized
        let stored = repo
            .find_by_email(&Email::new(ADMIN_EMAIL).unwrap())
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn bootstrapped_admin_can_log_in_again() {
        let (repo, config) = (store(), test_config());

        sign_in(&repo, &config, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();

        // Second login hits the stored record, not the bootstrap path
        let output = sign_in(&repo, &config, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        assert_eq!(output.user.role, UserRole::Admin);
    }
}

// ============================================================================
// Biometric login and enrollment
// ============================================================================

mod biometric_tests {
    use super::*;

    async fn biometric_sign_in(
        repo: &Arc<MemoryUserRepository>,
        config: &Arc<AuthConfig>,
        email: &str,
        assertion: &str,
    ) -> AuthResult<AuthenticatedOutput> {
        BiometricSignInUseCase::new(repo.clone(), config.clone())
            .execute(BiometricSignInInput {
                email: email.to_string(),
                assertion: assertion.to_string(),
            })
            .await
    }

    #[tokio::test]
    async fn matching_assertion_succeeds() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", Some("template-1"))
            .await
            .unwrap();

        let output = biometric_sign_in(&repo, &config, "a@x.com", "template-1")
            .await
            .unwrap();
        assert!(output.user.biometric_enabled);
    }

    #[tokio::test]
    async fn mismatched_assertion_fails() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", Some("template-1"))
            .await
            .unwrap();

        let err = biometric_sign_in(&repo, &config, "a@x.com", "template-2")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BiometricFailed));
        assert_eq!(err.to_string(), "Biometric authentication failed");
    }

    #[tokio::test]
    async fn unenrolled_account_is_rejected() {
        let (repo, config) = (store(), test_config());
        sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let err = biometric_sign_in(&repo, &config, "a@x.com", "template-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BiometricNotEnabled));
    }

    #[tokio::test]
    async fn unknown_email_is_reported_distinctly() {
        let (repo, config) = (store(), test_config());

        let err = biometric_sign_in(&repo, &config, "nobody@x.com", "template-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BiometricUnknownUser));
    }

    #[tokio::test]
    async fn enroll_remove_status_flow() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        let user_id = output.user.user_id.to_string();

        let enroll = BiometricEnrollUseCase::new(repo.clone());

        enroll.enroll(&user_id, "template-1").await.unwrap();
        let status = enroll.status("a@x.com").await.unwrap();
        assert!(status.biometric_enabled);
        assert_eq!(status.email, "a@x.com");
        assert_eq!(status.name, "Alice");

        enroll.remove(&user_id).await.unwrap();
        let status = enroll.status("a@x.com").await.unwrap();
        assert!(!status.biometric_enabled);

        // Removal is idempotent
        enroll.remove(&user_id).await.unwrap();
    }

    #[tokio::test]
    async fn reenrollment_overwrites_the_single_credential() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", Some("template-1"))
            .await
            .unwrap();
        let user_id = output.user.user_id.to_string();

        BiometricEnrollUseCase::new(repo.clone())
            .enroll(&user_id, "template-2")
            .await
            .unwrap();

        // Only the new template logs in now
        assert!(
            biometric_sign_in(&repo, &config, "a@x.com", "template-1")
                .await
                .is_err()
        );
        assert!(
            biometric_sign_in(&repo, &config, "a@x.com", "template-2")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn unknown_user_id_is_not_found() {
        let (repo, _config) = (store(), test_config());
        let enroll = BiometricEnrollUseCase::new(repo.clone());

        let err = enroll
            .enroll(&Uuid::new_v4().to_string(), "template-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));

        let err = enroll.remove("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = enroll.status("nobody@x.com").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}

// ============================================================================
// Refresh rotation
// ============================================================================

mod refresh_tests {
    use super::*;

    #[tokio::test]
    async fn refresh_rotates_and_old_token_is_single_use() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        let first_token = output.tokens.refresh.token;

        let refresh = RefreshUseCase::new(repo.clone(), config.clone());

        // First presentation succeeds and rotates the slot
        let rotated = refresh.execute(&first_token).await.unwrap();
        assert_eq!(rotated.user_id, output.user.user_id.to_string());
        assert_ne!(rotated.tokens.refresh.token, first_token);

        // Presenting the same token again fails
        let err = refresh.execute(&first_token).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        // The replacement works exactly once more
        refresh.execute(&rotated.tokens.refresh.token).await.unwrap();
    }

    #[tokio::test]
    async fn garbage_and_wrong_kind_tokens_are_rejected() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();

        let refresh = RefreshUseCase::new(repo.clone(), config.clone());

        let err = refresh.execute("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));

        // An access token is signed with a different secret
        let err = refresh
            .execute(&output.tokens.access.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }
}

// ============================================================================
// Logout
// ============================================================================

mod sign_out_tests {
    use super::*;

    #[tokio::test]
    async fn logout_clears_the_slot() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        let token = output.tokens.refresh.token;

        SignOutUseCase::new(repo.clone()).execute(&token).await.unwrap();

        let stored = repo
            .find_by_email(&Email::new("a@x.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.refresh_token.is_none());

        // The cleared token can no longer refresh
        let err = RefreshUseCase::new(repo.clone(), config.clone())
            .execute(&token)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidRefreshToken));
    }

    #[tokio::test]
    async fn logout_with_unknown_token_is_a_noop_success() {
        let (repo, _config) = (store(), test_config());

        let result = SignOutUseCase::new(repo.clone())
            .execute("never-issued-token")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (repo, config) = (store(), test_config());
        let output = sign_up(&repo, &config, "a@x.com", None).await.unwrap();
        let token = output.tokens.refresh.token;

        let use_case = SignOutUseCase::new(repo.clone());
        use_case.execute(&token).await.unwrap();
        use_case.execute(&token).await.unwrap();
    }
}
