//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tower::ServiceExt;

use account_service::adapters::auth::{Argon2CredentialVerifier, JwtTokenIssuer, MockIdentityProvider};
use account_service::adapters::http::{app_router, AppState};
use account_service::adapters::memory::InMemoryUserRepository;
use account_service::adapters::stripe::MockPaymentProvider;

pub const JWT_SECRET: &str = "integration-secret-integration-secret";
pub const FRONTEND_URL: &str = "http://localhost:5173";

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub payments: MockPaymentProvider,
    pub tokens: Arc<JwtTokenIssuer>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(|state| state)
    }

    /// Builds the app, letting the caller adjust the state first.
    pub fn build(configure: impl FnOnce(AppState) -> AppState) -> Self {
        Self::with_identity_provider(MockIdentityProvider::new(), configure)
    }

    pub fn with_identity_provider(
        identity: MockIdentityProvider,
        configure: impl FnOnce(AppState) -> AppState,
    ) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let payments = MockPaymentProvider::new();
        let tokens = Arc::new(JwtTokenIssuer::new(JWT_SECRET));

        let state = AppState::new(
            users.clone(),
            Arc::new(Argon2CredentialVerifier::new()),
            tokens.clone(),
            Arc::new(payments.clone()),
            FRONTEND_URL,
        )
        .with_identity_provider(Arc::new(identity));

        Self {
            router: app_router(configure(state)),
            users,
            payments,
            tokens,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get_with_token(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut request = Request::get(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// Registers a password account and returns its token.
    pub async fn register(&self, email: &str, password: &str, full_name: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/register",
                serde_json::json!({ "email": email, "password": password, "fullName": full_name }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn hmac_sha256_hex(secret: &str, message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// `Stripe-Signature` header value for `payload` signed at `timestamp`.
pub fn stripe_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed = format!("{}.{}", timestamp, payload);
    format!("t={},v1={}", timestamp, hmac_sha256_hex(secret, signed.as_bytes()))
}
