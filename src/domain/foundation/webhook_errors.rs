//! Errors raised while handling provider webhooks (payment and KYC).
//!
//! Webhook handlers never propagate these past the HTTP boundary; each one
//! is logged and turned into a status code for the provider.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Authenticity header absent while a secret is configured.
    #[error("Missing signature")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window (5 minutes).
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance, or too
    /// far from the clock to compare.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from webhook payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// No account matches the identity carried by the event.
    #[error("Could not find the user: {0}")]
    UserNotFound(String),

    /// Provider lookup made while handling the event failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Maps the error to the status code returned to the provider.
    ///
    /// - 4xx: rejected, no redelivery
    /// - 5xx: provider may redeliver
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange => StatusCode::UNAUTHORIZED,

            WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,

            WebhookError::UserNotFound(_) => StatusCode::NOT_FOUND,

            WebhookError::Upstream(_) => StatusCode::BAD_GATEWAY,

            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("invalid JSON".to_string());
        assert_eq!(format!("{}", err), "Parse error: invalid JSON");
    }

    #[test]
    fn signature_failures_are_unauthorized() {
        assert_eq!(WebhookError::InvalidSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(WebhookError::MissingSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WebhookError::TimestampOutOfRange.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn unknown_user_is_not_found() {
        let err = WebhookError::UserNotFound("a@x.com".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(format!("{}", err), "Could not find the user: a@x.com");
    }

    #[test]
    fn storage_failures_are_server_errors() {
        assert_eq!(
            WebhookError::Database("timeout".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WebhookError::Upstream("stripe down".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
