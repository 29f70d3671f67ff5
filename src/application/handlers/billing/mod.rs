//! Billing handlers - checkout initiation and payment webhooks.

mod handle_payment_webhook;
mod initiate_payment;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use initiate_payment::{InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult};
