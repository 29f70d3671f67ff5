//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change state (registration, webhooks, checkout); query
//! handlers only read it.

pub mod handlers;

pub use handlers::account::{
    AccountStateMachine, GetKycStatusHandler, GetKycStatusQuery, GetSubscriptionStatusHandler,
    GetSubscriptionStatusQuery, SubscriptionStatus,
};
pub use handlers::billing::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    InitiatePaymentCommand, InitiatePaymentHandler, InitiatePaymentResult,
};
pub use handlers::identity::{
    FederatedLoginCommand, FederatedLoginHandler, FederatedLoginResult, LoginUserCommand,
    LoginUserHandler, RegisterUserCommand, RegisterUserHandler, INVALID_CREDENTIALS,
};
pub use handlers::kyc::{HandleKycWebhookCommand, HandleKycWebhookHandler, HandleKycWebhookResult};
