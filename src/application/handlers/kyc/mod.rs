//! KYC handlers.

mod handle_kyc_webhook;

pub use handle_kyc_webhook::{HandleKycWebhookCommand, HandleKycWebhookHandler, HandleKycWebhookResult};
