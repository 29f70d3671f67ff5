//! Account-level errors surfaced by identity and state-machine handlers.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Unauthorized | 401 |
//! | InvalidToken | 403 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Upstream | 400 (payment) / 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while resolving identity or changing account state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Missing or malformed caller input.
    Validation { field: String, message: String },

    /// Login rejected. The message never reveals which credential was wrong.
    Unauthorized(String),

    /// Bearer token failed signature or payload checks.
    InvalidToken,

    /// No account matched the lookup.
    NotFound(String),

    /// An account with this email already exists.
    Conflict(String),

    /// A payment or identity provider call failed.
    Upstream(String),

    /// Storage or other internal failure.
    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AccountError::Unauthorized(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        AccountError::NotFound(what.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AccountError::Conflict(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        AccountError::Upstream(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::Validation { .. } => "VALIDATION_FAILED",
            AccountError::Unauthorized(_) => "UNAUTHORIZED",
            AccountError::InvalidToken => "INVALID_TOKEN",
            AccountError::NotFound(_) => "NOT_FOUND",
            AccountError::Conflict(_) => "CONFLICT",
            AccountError::Upstream(_) => "UPSTREAM_SERVICE_ERROR",
            AccountError::Infrastructure(_) => "INTERNAL_ERROR",
        }
    }

    /// Caller-facing message.
    pub fn message(&self) -> String {
        match self {
            AccountError::Validation { message, .. } => message.clone(),
            AccountError::Unauthorized(message) => message.clone(),
            AccountError::InvalidToken => "failed".to_string(),
            AccountError::NotFound(what) => format!("Could not find {}", what),
            AccountError::Conflict(message) => message.clone(),
            AccountError::Upstream(message) => message.clone(),
            AccountError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::Infrastructure(detail) => write!(f, "infrastructure error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                AccountError::Validation {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::UserNotFound => AccountError::NotFound("the user".to_string()),
            ErrorCode::UserExists => AccountError::Conflict(err.message),
            ErrorCode::ExternalServiceError => AccountError::Upstream(err.message),
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                AccountError::Infrastructure(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_exists_maps_to_conflict() {
        let err: AccountError =
            DomainError::new(ErrorCode::UserExists, "Email already in use.").into();
        assert_eq!(err, AccountError::Conflict("Email already in use.".to_string()));
    }

    #[test]
    fn user_not_found_maps_to_not_found() {
        let err: AccountError = DomainError::new(ErrorCode::UserNotFound, "missing").into();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[test]
    fn database_error_maps_to_infrastructure_with_generic_message() {
        let err: AccountError = DomainError::database("connection reset").into();
        assert!(matches!(err, AccountError::Infrastructure(_)));
        assert_eq!(err.message(), "Internal server error");
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn validation_keeps_field_from_details() {
        let err: AccountError = DomainError::validation("fullName", "Full name is required.").into();
        assert_eq!(
            err,
            AccountError::validation("fullName", "Full name is required.")
        );
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(AccountError::InvalidToken.code(), "INVALID_TOKEN");
        assert_eq!(AccountError::conflict("x").code(), "CONFLICT");
        assert_eq!(AccountError::upstream("x").code(), "UPSTREAM_SERVICE_ERROR");
    }
}
