//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Argon2 password hashing, JWT tokens, Google OAuth
//! - `http` - Axum routers, middleware and error mapping
//! - `memory` - In-memory user store
//! - `postgres` - PostgreSQL user store
//! - `stripe` - Stripe payment provider

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;

pub use auth::{Argon2CredentialVerifier, GoogleOAuthProvider, JwtTokenIssuer};
pub use memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
pub use stripe::{StripeConfig, StripePaymentAdapter};
