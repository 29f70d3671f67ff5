//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token gate and principal propagation

pub mod auth;

pub use auth::{bearer_token, require_principal, verify_token, RequirePrincipal, MISSING_TOKEN};
