//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - durable user records (PostgreSQL, in-memory)
//! - `CredentialVerifier` - password hashing (Argon2)
//! - `TokenIssuer` - stateless bearer tokens (JWT)
//! - `PaymentProvider` - customer, payment and subscription calls (Stripe)
//! - `FederatedIdentityProvider` - third-party login (Google OAuth2)

mod credential_verifier;
mod identity_provider;
mod payment_provider;
mod token_issuer;
mod user_repository;

pub use credential_verifier::CredentialVerifier;
pub use identity_provider::{AuthorizationRequest, FederatedIdentityProvider, FederatedProfile};
pub use payment_provider::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Product, Subscription,
};
pub use token_issuer::TokenIssuer;
pub use user_repository::UserRepository;
