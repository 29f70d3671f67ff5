//! Billing HTTP endpoints: checkout, paid-access status and the Stripe webhook.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{MessageResponse, PaymentRequest, PaymentResponse, WebhookAck};
pub use handlers::STRIPE_SIGNATURE_HEADER;
pub use routes::billing_routes;
