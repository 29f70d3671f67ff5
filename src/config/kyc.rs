//! KYC webhook configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KycConfig {
    /// Shared secret for the `X-Payload-Digest` header; deliveries are
    /// accepted unsigned when unset
    pub webhook_secret: Option<String>,
}

impl KycConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(self.webhook_secret.as_deref(), Some("")) {
            return Err(ValidationError::MissingRequired("KYC__WEBHOOK_SECRET"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_secret_is_valid() {
        assert!(KycConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let config = KycConfig {
            webhook_secret: Some(String::new()),
        };
        assert!(config.validate().is_err());
    }
}
