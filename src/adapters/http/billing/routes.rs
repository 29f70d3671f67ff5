//! Axum router for billing endpoints.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::require_principal;
use crate::adapters::http::state::AppState;

use super::handlers::{payment, payment_webhook, verify_subscription};

/// Create the billing API router.
///
/// # Routes
/// - `GET /verifySubscription` - Paid-access status (bearer token)
/// - `POST /payment` - Start a prepaid charge or subscription
/// - `POST /webhook` - Stripe events (signature verified)
pub fn billing_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/verifySubscription", get(verify_subscription))
        .route_layer(from_fn_with_state(state, require_principal));

    Router::new()
        .route("/payment", post(payment))
        .route("/webhook", post(payment_webhook))
        .merge(protected)
}
