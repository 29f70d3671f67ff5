//! HTTP handlers for KYC endpoints.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::billing::{MessageResponse, WebhookAck};
use crate::adapters::http::error::{ApiError, WebhookApiError};
use crate::adapters::http::middleware::RequirePrincipal;
use crate::adapters::http::state::AppState;
use crate::application::{GetKycStatusQuery, HandleKycWebhookCommand, HandleKycWebhookResult};

/// Header carrying the hex HMAC-SHA256 of the raw body.
pub const PAYLOAD_DIGEST_HEADER: &str = "X-Payload-Digest";

/// GET /api/kyc/verifyKYC
pub async fn verify_kyc(
    State(state): State<AppState>,
    RequirePrincipal(principal): RequirePrincipal,
) -> Result<impl IntoResponse, ApiError> {
    let verified = state
        .kyc_status_handler()
        .handle(GetKycStatusQuery {
            email: principal.email,
        })
        .await?;

    Ok(Json(MessageResponse::new(verified.status_message())))
}

/// POST /api/kyc/webhook
pub async fn kyc_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let digest = headers
        .get(PAYLOAD_DIGEST_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let result = state
        .kyc_webhook_handler()
        .handle(HandleKycWebhookCommand {
            payload: body.to_vec(),
            digest,
        })
        .await?;

    match &result {
        HandleKycWebhookResult::Updated { user_id, verified } => {
            tracing::info!(user_id = %user_id, verified = verified.as_str(), "kyc status updated")
        }
        HandleKycWebhookResult::Ignored(reason) => {
            tracing::debug!(reason = %reason, "kyc webhook ignored")
        }
    }

    Ok(Json(WebhookAck::received()))
}
