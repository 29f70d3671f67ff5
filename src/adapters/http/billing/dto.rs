//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{InitiatePaymentCommand, InitiatePaymentResult};

/// POST /api/billing/payment body.
///
/// Missing fields deserialize as empty and are rejected by the handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub requested_plan: String,
}

impl From<PaymentRequest> for InitiatePaymentCommand {
    fn from(req: PaymentRequest) -> Self {
        InitiatePaymentCommand {
            name: req.name,
            email: req.email,
            payment_method: req.payment_method,
            requested_plan: req.requested_plan,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub client_secret: Option<String>,
}

impl From<InitiatePaymentResult> for PaymentResponse {
    fn from(result: InitiatePaymentResult) -> Self {
        let message = match &result {
            InitiatePaymentResult::PrepaidCharged { .. } => None,
            InitiatePaymentResult::SubscriptionStarted { .. } => {
                Some("Subscription successfully initiated".to_string())
            }
        };
        Self {
            message,
            client_secret: result.client_secret().map(str::to_string),
        }
    }
}

/// `{"message": "..."}` body shared by the status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgement returned to the webhook sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

impl WebhookAck {
    pub fn received() -> Self {
        Self { received: true }
    }
}
