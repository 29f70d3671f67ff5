//! Bearer token gate and principal propagation.
//!
//! This module provides:
//! - `verify_token` - Pure validity check: 401 without a token, 403 when
//!   it fails to decode, 200 otherwise. Nothing is forwarded.
//! - `require_principal` - Middleware that decodes the token and injects the
//!   `Principal` into request extensions
//! - `RequirePrincipal` - Extractor that reads it back in handlers
//!
//! ```text
//! Request → require_principal → injects Principal into extensions
//!                                      ↓
//!                              Handler → RequirePrincipal extractor
//! ```
//!
//! Decoding never consults the user store, so the principal reflects the
//! account as it was when the token was issued.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::domain::account::{AccountError, Principal};

/// Message for requests without a bearer token.
pub const MISSING_TOKEN: &str = "missing token";

/// Extracts the token from `Authorization: Bearer <token>`.
///
/// The scheme name is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let (scheme, token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.trim_start().split_once(' '))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|token| !token.is_empty())
}

fn decode_principal(state: &AppState, headers: &HeaderMap) -> Result<Principal, AccountError> {
    let token = bearer_token(headers).ok_or_else(|| AccountError::unauthorized(MISSING_TOKEN))?;
    state.tokens.decode(token)
}

/// GET /api/auth/verify
pub async fn verify_token(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match decode_principal(&state, &headers) {
        Ok(_) => Json(json!({ "message": "verified" })).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Rejects the request unless it carries a valid bearer token.
///
/// On success the decoded `Principal` is available to handlers through
/// [`RequirePrincipal`].
pub async fn require_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match decode_principal(&state, request.headers()) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            ApiError::from(e).into_response()
        }
    }
}

/// Extractor for the principal injected by [`require_principal`].
///
/// Rejects with 401 if the middleware did not run for this route.
#[derive(Debug, Clone)]
pub struct RequirePrincipal(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for RequirePrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(RequirePrincipal)
            .ok_or_else(|| AccountError::unauthorized(MISSING_TOKEN).into())
    }
}
