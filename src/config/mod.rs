//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ACCOUNT_SERVICE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use account_service::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod auth;
mod database;
mod error;
mod kyc;
mod payment;
mod server;

pub use auth::{AuthConfig, GoogleConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use kyc::KycConfig;
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL user store; in-memory when absent
    pub database: Option<DatabaseConfig>,

    /// Token signing and Google login
    pub auth: AuthConfig,

    /// Stripe credentials and plans
    pub payment: PaymentConfig,

    /// KYC webhook authentication
    #[serde(default)]
    pub kyc: KycConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ACCOUNT_SERVICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ACCOUNT_SERVICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ACCOUNT_SERVICE__AUTH__GOOGLE__CLIENT_ID=...` -> `auth.google.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ACCOUNT_SERVICE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match &self.database {
            Some(database) => database.validate()?,
            None if self.is_production() => {
                return Err(ValidationError::DatabaseRequiredInProduction)
            }
            None => {}
        }
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.kyc.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
