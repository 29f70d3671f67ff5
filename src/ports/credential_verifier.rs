//! Password hashing port.
//!
//! Hashing is salted and intentionally slow. Both operations are CPU-bound
//! and synchronous; async callers should run them on a blocking thread.

use crate::domain::foundation::DomainError;

pub trait CredentialVerifier: Send + Sync {
    /// Hashes `plaintext` under a fresh random salt.
    ///
    /// Two calls with the same input return different hashes.
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// True iff `plaintext` matches `hashed`.
    ///
    /// A malformed `hashed` value verifies as `false` rather than erroring.
    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}
