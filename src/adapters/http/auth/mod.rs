//! HTTP adapter for authentication endpoints.
//!
//! - `GET /api/auth/verify` - Bearer token validity check
//! - `POST /api/auth/register` - Password sign-up
//! - `POST /api/auth/login` - Password login
//! - `GET /api/auth/google` - Start Google login
//! - `GET /api/auth/google/callback` - Finish Google login

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{LoginRequest, OAuthCallbackParams, RegisterRequest, TokenResponse};
pub use handlers::OAUTH_STATE_COOKIE;
pub use routes::auth_routes;
