//! Google OAuth2 adapter for federated login.
//!
//! Runs the authorization-code flow with the `openid email profile` scopes,
//! then reads the profile from Google's userinfo endpoint.

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl, Scope,
    TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::domain::account::AccountError;
use crate::ports::{AuthorizationRequest, FederatedIdentityProvider, FederatedProfile};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const SCOPES: [&str; 3] = ["openid", "email", "profile"];

#[derive(Clone)]
pub struct GoogleOAuthProvider {
    client: BasicClient,
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleOAuthProvider {
    /// # Errors
    ///
    /// - `Infrastructure` if `redirect_url` is not a valid URL
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Result<Self, AccountError> {
        let invalid = |what: &str, e: oauth2::url::ParseError| {
            AccountError::infrastructure(format!("Invalid Google {} URL: {}", what, e))
        };

        let client = BasicClient::new(
            ClientId::new(client_id.into()),
            Some(ClientSecret::new(client_secret.into())),
            AuthUrl::new(GOOGLE_AUTH_URL.to_string()).map_err(|e| invalid("auth", e))?,
            Some(TokenUrl::new(GOOGLE_TOKEN_URL.to_string()).map_err(|e| invalid("token", e))?),
        )
        .set_redirect_uri(RedirectUrl::new(redirect_url.into()).map_err(|e| invalid("redirect", e))?);

        Ok(Self {
            client,
            http: reqwest::Client::new(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

#[async_trait]
impl FederatedIdentityProvider for GoogleOAuthProvider {
    fn authorization_url(&self) -> AuthorizationRequest {
        let mut request = self.client.authorize_url(CsrfToken::new_random);
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        let (url, state) = request.add_extra_param("prompt", "consent").url();

        AuthorizationRequest {
            url: url.to_string(),
            state: state.secret().clone(),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, AccountError> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .request_async(async_http_client)
            .await
            .map_err(|e| AccountError::upstream(format!("Google token exchange failed: {}", e)))?;

        let info: GoogleUserInfo = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AccountError::upstream(format!("Google userinfo request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| AccountError::upstream(format!("Invalid Google userinfo response: {}", e)))?;

        tracing::debug!(provider_id = %info.sub, "fetched google profile");

        Ok(FederatedProfile {
            provider_id: info.sub,
            email: info.email,
            display_name: info.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleOAuthProvider {
        GoogleOAuthProvider::new("client-id", "client-secret", "http://localhost:3000/api/auth/google/callback")
            .unwrap()
    }

    #[test]
    fn authorization_url_requests_consent_and_scopes() {
        let request = provider().authorization_url();

        assert!(request.url.starts_with(GOOGLE_AUTH_URL));
        assert!(request.url.contains("client_id=client-id"));
        assert!(request.url.contains("prompt=consent"));
        assert!(request.url.contains("scope=openid+email+profile"));
        assert!(request.url.contains(&format!("state={}", request.state)));
    }

    #[test]
    fn each_authorization_gets_fresh_state() {
        let provider = provider();
        let first = provider.authorization_url();
        let second = provider.authorization_url();

        assert!(!first.state.is_empty());
        assert_ne!(first.state, second.state);
    }

    #[test]
    fn invalid_redirect_url_is_rejected() {
        let result = GoogleOAuthProvider::new("id", "secret", "not a url");
        assert!(matches!(result, Err(AccountError::Infrastructure(_))));
    }

    #[test]
    fn userinfo_tolerates_missing_email() {
        let info: GoogleUserInfo = serde_json::from_str(r#"{"sub":"1234"}"#).unwrap();
        assert_eq!(info.sub, "1234");
        assert!(info.email.is_none());
        assert!(info.name.is_none());
    }
}
