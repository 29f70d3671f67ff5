//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("A database is required in production")]
    DatabaseRequiredInProduction,

    #[error("JWT secret must be at least {0} bytes in production")]
    JwtSecretTooShort(usize),

    #[error("Token TTL must be greater than zero")]
    InvalidTokenTtl,

    #[error("Invalid front-end URL")]
    InvalidFrontendUrl,

    #[error("Google callback URL must be an absolute http(s) URL")]
    InvalidGoogleCallbackUrl,

    #[error("Invalid Stripe API key format")]
    InvalidStripeKey,

    #[error("Invalid Stripe webhook secret format")]
    InvalidStripeWebhookSecret,

    #[error("Micro-payment amount must be positive")]
    InvalidMicroPaymentAmount,

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid plan entry: {0}")]
    InvalidPlan(String),
}
