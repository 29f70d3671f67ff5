//! Axum router for KYC endpoints.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::require_principal;
use crate::adapters::http::state::AppState;

use super::handlers::{kyc_webhook, verify_kyc};

/// # Routes
/// - `GET /verifyKYC` - Verification status (bearer token)
/// - `POST /webhook` - Provider status updates (digest verified)
pub fn kyc_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/verifyKYC", get(verify_kyc))
        .route_layer(from_fn_with_state(state, require_principal));

    Router::new()
        .route("/webhook", post(kyc_webhook))
        .merge(protected)
}
