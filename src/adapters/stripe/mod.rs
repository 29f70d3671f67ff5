//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe integration:
//! - Product lookup
//! - Customer search, creation and default payment methods
//! - Payment intents and subscriptions
//!
//! Webhook verification lives in `domain::billing`; this module only talks
//! to the REST API. The secret key is held in a `secrecy::SecretString`.

mod api_types;
mod mock_payment_provider;
mod stripe_adapter;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
