//! Biometric Digest Value Object
//!
//! Deterministic, unsalted SHA-256 over the raw assertion, stored as
//! lowercase hex. The same input always produces the same digest, so no raw
//! biometric material is ever retained.
//!
//! Because the digest carries no salt, challenge or nonce it behaves as a
//! static shared secret. That matches the observed behavior of the service
//! this replaces; it is not a hardened biometric scheme.

use platform::crypto::{constant_time_eq, sha256, to_hex};
use std::fmt;

/// Content-addressed digest of a biometric assertion
#[derive(Clone, Eq)]
pub struct BiometricDigest(String);

impl BiometricDigest {
    /// Digest a raw biometric assertion
    pub fn from_assertion(assertion: &str) -> Self {
        Self(to_hex(&sha256(assertion.as_bytes())))
    }

    /// Create from the stored column value
    pub fn from_db(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Get the hex digest for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for BiometricDigest {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Debug for BiometricDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BiometricDigest").field(&"[DIGEST]").finish()
    }
}
