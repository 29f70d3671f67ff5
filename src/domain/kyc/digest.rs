//! `X-Payload-Digest` verification for KYC deliveries.
//!
//! The provider signs the raw request body with HMAC-SHA256 under the shared
//! webhook secret and sends the lowercase hex digest.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::WebhookError;

#[derive(Clone)]
pub struct PayloadDigestVerifier {
    secret: String,
}

impl PayloadDigestVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, payload: &[u8], digest_header: &str) -> Result<(), WebhookError> {
        let provided = hex::decode(digest_header.trim())
            .map_err(|_| WebhookError::ParseError("invalid payload digest hex".to_string()))?;
        let expected = self.digest(payload);

        if provided.len() == expected.len() && bool::from(provided.ct_eq(&expected)) {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    fn digest(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Hex digest for test fixtures.
    #[cfg(test)]
    pub fn sign_hex(&self, payload: &[u8]) -> String {
        hex::encode(self.digest(payload))
    }
}
