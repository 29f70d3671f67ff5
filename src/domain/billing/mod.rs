//! Billing domain - plan catalog and the payment provider's webhook events.

mod payment_event;
mod plan;
mod stripe_event;
mod webhook_verifier;

pub use payment_event::PaymentEvent;
pub use plan::{Plan, PlanCatalog, PAY_PER_USE};
pub use stripe_event::{StripeEvent, StripeEventData};
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};

#[cfg(test)]
pub use stripe_event::StripeEventBuilder;
#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
