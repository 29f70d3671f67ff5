//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest JWT secret accepted in production (HS256 key length).
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token signing and federated login settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,

    /// Token lifetime; tokens never expire when unset
    pub token_ttl_secs: Option<u64>,

    /// Front-end base URL that receives OAuth redirects
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Google login; the `/google` routes answer 404 when unset
    pub google: Option<GoogleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production additionally requires a secret of at least
    /// [`MIN_PRODUCTION_SECRET_LEN`] bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_secs == Some(0) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if !is_http_url(&self.frontend_url) {
            return Err(ValidationError::InvalidFrontendUrl);
        }
        if let Some(google) = &self.google {
            google.validate()?;
        }
        Ok(())
    }
}

impl GoogleConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__GOOGLE__CLIENT_ID"));
        }
        if self.client_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__GOOGLE__CLIENT_SECRET"));
        }
        if !is_http_url(&self.callback_url) {
            return Err(ValidationError::InvalidGoogleCallbackUrl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: None,
            frontend_url: default_frontend_url(),
            google: None,
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}
