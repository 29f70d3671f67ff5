//! Authentication adapters.
//!
//! Implementations of the credential, token and federated identity ports:
//!
//! - `argon2_verifier` - Argon2id password hashing
//! - `jwt_token_issuer` - HS256 bearer tokens
//! - `google_oauth` - Google OAuth2 authorization-code flow
//! - `mock` - Identity provider that doesn't require external services

mod argon2_verifier;
mod google_oauth;
mod jwt_token_issuer;
mod mock;

pub use argon2_verifier::Argon2CredentialVerifier;
pub use google_oauth::GoogleOAuthProvider;
pub use jwt_token_issuer::JwtTokenIssuer;
pub use mock::{MockIdentityProvider, MOCK_AUTHORIZE_URL};
