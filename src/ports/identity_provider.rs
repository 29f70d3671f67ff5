//! Federated identity provider port (e.g. Google OAuth2).

use async_trait::async_trait;

use crate::domain::account::AccountError;

/// Where to send the browser, and the anti-CSRF state bound to that redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Profile returned by the provider after a successful exchange.
///
/// Providers may legally omit the email; callers must reject such logins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    pub provider_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[async_trait]
pub trait FederatedIdentityProvider: Send + Sync {
    /// Builds the consent-screen redirect with a fresh state value.
    fn authorization_url(&self) -> AuthorizationRequest;

    /// Exchanges an authorization code for the user's profile.
    ///
    /// # Errors
    ///
    /// - `Upstream` if the token exchange or profile fetch fails
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, AccountError>;
}
