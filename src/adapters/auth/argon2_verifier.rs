//! Argon2id password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CredentialVerifier;

/// Hashes with Argon2id default parameters and a fresh salt per call.
///
/// Hashes are self-describing PHC strings, so parameter changes do not
/// invalidate previously stored hashes.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialVerifier {
    argon2: Argon2<'static>,
}

impl Argon2CredentialVerifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVerifier for Argon2CredentialVerifier {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Password hashing failed: {}", e),
                )
            })?
            .to_string();

        Ok(hash)
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hashed) else {
            return false;
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
