//! HS256 bearer tokens.

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::account::{AccountError, Principal};
use crate::domain::foundation::Timestamp;
use crate::ports::TokenIssuer;

/// Token payload: the principal's fields plus timing claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    principal: Principal,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Signs tokens with a shared secret.
///
/// Without a TTL, tokens carry no `exp` claim and never expire.
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<Duration>,
}

impl JwtTokenIssuer {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = SecretString::new(secret.into());
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl: None,
        }
    }

    /// Sets a token lifetime. Expired tokens fail to decode.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.ttl.is_none() {
            validation.validate_exp = false;
            validation.required_spec_claims.clear();
        }
        validation
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, principal: &Principal) -> Result<String, AccountError> {
        let now = Timestamp::now().as_unix_secs();
        let claims = Claims {
            principal: principal.clone(),
            iat: now,
            exp: self.ttl.map(|ttl| now + ttl.as_secs() as i64),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AccountError::infrastructure(format!("Failed to sign token: {}", e)))
    }

    fn decode(&self, token: &str) -> Result<Principal, AccountError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims.principal)
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AccountError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Role;
    use crate::domain::foundation::UserId;

    fn principal() -> Principal {
        Principal {
            id: UserId::new("u-42").unwrap(),
            full_name: "Alice Example".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn issued_token_decodes_to_same_principal() {
        let issuer = JwtTokenIssuer::new("top-secret");
        let token = issuer.issue(&principal()).unwrap();

        assert_eq!(issuer.decode(&token).unwrap(), principal());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtTokenIssuer::new("one").issue(&principal()).unwrap();
        let result = JwtTokenIssuer::new("two").decode(&token);

        assert!(matches!(result, Err(AccountError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = JwtTokenIssuer::new("top-secret");
        assert!(matches!(issuer.decode("not.a.jwt"), Err(AccountError::InvalidToken)));
        assert!(matches!(issuer.decode(""), Err(AccountError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let issuer = JwtTokenIssuer::new("top-secret");
        let token = issuer.issue(&principal()).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = parts[1].chars().rev().collect();

        assert!(issuer.decode(&parts.join(".")).is_err());
    }

    #[test]
    fn tokens_without_ttl_have_no_exp() {
        let issuer = JwtTokenIssuer::new("top-secret");
        let token = issuer.issue(&principal()).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"top-secret"),
            &validation,
        )
        .unwrap();

        assert!(data.claims.get("exp").is_none());
        assert_eq!(data.claims["fullName"], "Alice Example");
        assert_eq!(data.claims["role"], "CUSTOMER");
    }

    #[test]
    fn ttl_adds_exp_claim() {
        let issuer = JwtTokenIssuer::new("top-secret").with_ttl(Duration::from_secs(3600));
        let token = issuer.issue(&principal()).unwrap();

        assert_eq!(issuer.decode(&token).unwrap(), principal());
    }

    #[test]
    fn expired_token_is_rejected_when_ttl_is_set() {
        let issuer = JwtTokenIssuer::new("top-secret").with_ttl(Duration::from_secs(60));
        let now = Timestamp::now().as_unix_secs();
        let claims = Claims {
            principal: principal(),
            iat: now - 7200,
            exp: Some(now - 3600),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"top-secret"),
        )
        .unwrap();

        assert!(matches!(issuer.decode(&token), Err(AccountError::InvalidToken)));
    }
}
