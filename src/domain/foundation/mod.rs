//! Shared building blocks for every domain module.

mod errors;
mod ids;
mod timestamp;
mod webhook_errors;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use timestamp::Timestamp;
pub use webhook_errors::WebhookError;
