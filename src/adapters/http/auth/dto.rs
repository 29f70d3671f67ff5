//! HTTP DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{LoginUserCommand, RegisterUserCommand};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Missing fields deserialize as empty so the handler can report them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<RegisterRequest> for RegisterUserCommand {
    fn from(req: RegisterRequest) -> Self {
        RegisterUserCommand {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LoginRequest> for LoginUserCommand {
    fn from(req: LoginRequest) -> Self {
        LoginUserCommand {
            email: req.email,
            password: req.password,
        }
    }
}

/// Query string Google appends to the callback URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_reads_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"pw1","fullName":"Alice"}"#,
        )
        .unwrap();
        let cmd = RegisterUserCommand::from(req);

        assert_eq!(cmd.email, "a@x.com");
        assert_eq!(cmd.full_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn missing_fields_become_empty() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
        assert!(req.full_name.is_none());
    }

    #[test]
    fn callback_params_all_optional() {
        let params: OAuthCallbackParams = serde_json::from_str(r#"{"error":"access_denied"}"#).unwrap();
        assert!(params.code.is_none());
        assert_eq!(params.error.as_deref(), Some("access_denied"));
    }
}
