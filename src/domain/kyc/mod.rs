//! KYC domain - verification-provider webhook events and their authenticity.

mod applicant;
mod digest;
mod kyc_event;

pub use applicant::email_from_external_user_id;
pub use digest::PayloadDigestVerifier;
pub use kyc_event::{KycEvent, KycWebhookPayload, ReviewAnswer, ReviewResult};
