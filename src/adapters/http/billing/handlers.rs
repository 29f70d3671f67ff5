//! HTTP handlers for billing endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, WebhookApiError};
use crate::adapters::http::middleware::RequirePrincipal;
use crate::adapters::http::state::AppState;
use crate::application::{
    GetSubscriptionStatusQuery, HandlePaymentWebhookCommand, HandlePaymentWebhookResult,
};

use super::dto::{MessageResponse, PaymentRequest, PaymentResponse, WebhookAck};

/// Header carrying the Stripe signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// GET /api/billing/verifySubscription
pub async fn verify_subscription(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let status = state
        .subscription_status_handler()
        .handle(GetSubscriptionStatusQuery {
            email: principal.email,
        })
        .await?;

    Ok(Json(MessageResponse::new(status.message())))
}

/// POST /api/billing/payment
pub async fn payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .initiate_payment_handler()
        .handle(req.into())
        .await
        .map_err(ApiError::checkout)?;

    Ok(Json(PaymentResponse::from(result)))
}

/// POST /api/billing/webhook
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let result = state
        .payment_webhook_handler()
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    match &result {
        HandlePaymentWebhookResult::Applied {
            user_id,
            transitions,
        } => tracing::info!(user_id = %user_id, ?transitions, "payment webhook applied"),
        HandlePaymentWebhookResult::NoChange => tracing::debug!("payment webhook changed nothing"),
        HandlePaymentWebhookResult::NoMatchingUser => {
            tracing::warn!("payment webhook has no matching account")
        }
        HandlePaymentWebhookResult::Ignored(event_type) => {
            tracing::debug!(event_type = %event_type, "payment webhook ignored")
        }
    }

    Ok(Json(WebhookAck::received()))
}
