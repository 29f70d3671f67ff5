//! HTTP adapters - REST API implementations.
//!
//! Each API area has its own module with DTOs, handlers and routes.
//! `router` assembles them under `/api/*`.

pub mod auth;
pub mod billing;
pub mod error;
pub mod kyc;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::{ApiError, ErrorResponse, WebhookApiError};
pub use router::{app_router, with_http_layers, HEALTH_MESSAGE};
pub use state::{AppState, BillingSettings, DEFAULT_CURRENCY, DEFAULT_MICRO_PAYMENT_AMOUNT};
