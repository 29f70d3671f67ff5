//! Top-level router: health check, API prefixes and transport layers.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::auth::auth_routes;
use super::billing::billing_routes;
use super::kyc::kyc_routes;
use super::state::AppState;

pub const HEALTH_MESSAGE: &str = "API health check passed successfully!";

async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// Builds the API router.
///
/// # Routes
/// - `GET /` - Health check
/// - `/api/auth/*` - Registration, login, token check, Google login
/// - `/api/billing/*` - Checkout, subscription status, Stripe webhook
/// - `/api/kyc/*` - Verification status, KYC webhook
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/auth", auth_routes())
        .nest("/api/billing", billing_routes(state.clone()))
        .nest("/api/kyc", kyc_routes(state.clone()))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

/// Wraps the router with request tracing, CORS and a request timeout.
///
/// An empty origin list allows any origin.
pub fn with_http_layers(router: Router, cors_origins: &[String], timeout: Duration) -> Router {
    router
        .layer(cors_layer(cors_origins))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{JwtTokenIssuer, MockIdentityProvider};
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::identity::test_support::PlainCredentialVerifier;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PlainCredentialVerifier),
            Arc::new(JwtTokenIssuer::new("router-test-secret-router-test-secret")),
            Arc::new(MockPaymentProvider::new()),
            "http://localhost:5173",
        )
        .with_identity_provider(Arc::new(MockIdentityProvider::new()))
    }

    #[tokio::test]
    async fn health_check_answers() {
        let app = app_router(state());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], HEALTH_MESSAGE.as_bytes());
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        for uri in ["/api/billing/verifySubscription", "/api/kyc/verifyKYC"] {
            let response = app_router(state())
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[tokio::test]
    async fn layers_keep_routes_reachable() {
        let app = with_http_layers(
            app_router(state()),
            &["http://localhost:5173".to_string()],
            Duration::from_secs(5),
        );
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
