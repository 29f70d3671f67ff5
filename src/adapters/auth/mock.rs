//! Mock federated identity provider for testing.
//!
//! Maps authorization codes to canned profiles so the login callback can be
//! exercised without talking to Google.
//!
//! # Example
//!
//! ```ignore
//! use account_service::adapters::auth::MockIdentityProvider;
//! use account_service::ports::FederatedProfile;
//!
//! let provider = MockIdentityProvider::new().with_profile("good-code", FederatedProfile {
//!     provider_id: "google-1".to_string(),
//!     email: Some("g@example.com".to_string()),
//!     display_name: Some("Gina".to_string()),
//! });
//!
//! let profile = provider.exchange_code("good-code").await?;
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::account::AccountError;
use crate::ports::{AuthorizationRequest, FederatedIdentityProvider, FederatedProfile};

/// Base URL the mock redirects to.
pub const MOCK_AUTHORIZE_URL: &str = "https://idp.example.test/authorize";

/// Codes not registered with [`with_profile`](Self::with_profile) fail the
/// exchange with `Upstream`.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    profiles: RwLock<HashMap<String, FederatedProfile>>,
    issued: AtomicU64,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a code that exchanges to `profile`.
    pub fn with_profile(self, code: impl Into<String>, profile: FederatedProfile) -> Self {
        self.profiles
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(code.into(), profile);
        self
    }
}

#[async_trait]
impl FederatedIdentityProvider for MockIdentityProvider {
    fn authorization_url(&self) -> AuthorizationRequest {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        let state = format!("mock-state-{}", n);
        AuthorizationRequest {
            url: format!("{}?state={}&prompt=consent", MOCK_AUTHORIZE_URL, state),
            state,
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, AccountError> {
        self.profiles
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(code)
            .cloned()
            .ok_or_else(|| AccountError::upstream("unknown authorization code"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> FederatedProfile {
        FederatedProfile {
            provider_id: "google-1".to_string(),
            email: Some("g@example.com".to_string()),
            display_name: Some("Gina".to_string()),
        }
    }

    #[tokio::test]
    async fn registered_code_exchanges_to_profile() {
        let provider = MockIdentityProvider::new().with_profile("good", profile());
        assert_eq!(provider.exchange_code("good").await.unwrap(), profile());
    }

    #[tokio::test]
    async fn unknown_code_fails_upstream() {
        let provider = MockIdentityProvider::new();
        let result = provider.exchange_code("bad").await;
        assert!(matches!(result, Err(AccountError::Upstream(_))));
    }

    #[test]
    fn authorization_states_are_distinct() {
        let provider = MockIdentityProvider::new();
        let first = provider.authorization_url();
        let second = provider.authorization_url();

        assert_ne!(first.state, second.state);
        assert!(first.url.contains(&first.state));
    }
}
