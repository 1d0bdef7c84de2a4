//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`. [`RawPassword`] is validated
//! user input (zeroized on drop); [`PasswordDigest`] is the stored one-way
//! digest.
//!
//! The stored digest is kept opaque until verification time: a corrupted
//! record surfaces as an error from [`PasswordDigest::verify`], which the
//! login flow maps to the same generic failure a wrong password produces.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with policy validation
    /// (8-128 characters, no control characters)
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw)
            .map_err(|e| AppError::bad_request(e.to_string()))?;
        Ok(Self(clear_text))
    }

    /// Create without policy validation.
    ///
    /// Used where the policy does not apply: login verification (stored
    /// credentials may predate the current policy) and the configured admin
    /// bootstrap password, which is operator input rather than signup input.
    pub fn new_unchecked(raw: String) -> Self {
        Self(ClearTextPassword::new_unchecked(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest (for storage)
// ============================================================================

/// Stored password digest in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash()
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;
        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Create from the stored column value. Not validated here; a malformed
    /// digest is only detected (and reported) by `verify`.
    pub fn from_db(phc_string: impl Into<String>) -> Self {
        Self(phc_string.into())
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Verify a raw password against this digest.
    ///
    /// `Ok(false)` on mismatch; `Err` when the stored digest is malformed.
    pub fn verify(&self, raw: &RawPassword) -> Result<bool, PasswordHashError> {
        let hashed = HashedPassword::from_phc_string(&self.0)?;
        hashed.verify(raw.inner())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());
        assert!(RawPassword::new("short".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let digest = PasswordDigest::from_raw(&raw).unwrap();

        assert!(digest.verify(&raw).unwrap());

        let wrong = RawPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!digest.verify(&wrong).unwrap());
    }

    #[test]
    fn test_malformed_stored_digest_is_an_error() {
        let digest = PasswordDigest::from_db("not-a-phc-string");
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        assert!(digest.verify(&raw).is_err());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let digest = PasswordDigest::from_raw(&raw).unwrap();

        let restored = PasswordDigest::from_db(digest.as_phc_string().to_string());
        assert!(restored.verify(&raw).unwrap());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let digest = PasswordDigest::from_raw(&raw).unwrap();
        let debug = format!("{:?}", digest);
        assert!(debug.contains("HASH"));
    }
}
