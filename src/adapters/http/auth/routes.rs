//! Axum router configuration for authentication endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{google_callback, google_login, login, register};
use crate::adapters::http::middleware::verify_token;
use crate::adapters::http::state::AppState;

/// Create the authentication router, mounted at `/api/auth`.
///
/// # Routes
/// - `GET /verify` - Bearer token validity check (200/401/403)
/// - `POST /register` - Password sign-up, returns a token
/// - `POST /login` - Password login, returns a token
/// - `GET /google` - Redirect to Google's consent screen
/// - `GET /google/callback` - Finish Google login, redirect to the front-end
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify_token))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google", get(google_login))
        .route("/google/callback", get(google_callback))
}
