//! HTTP handlers for authentication endpoints.

use axum::extract::{Json, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::FederatedLoginCommand;
use crate::domain::account::{AccountError, Principal, User};

use super::dto::{LoginRequest, OAuthCallbackParams, RegisterRequest, TokenResponse};

/// Cookie binding the OAuth `state` parameter to the browser that started the flow.
pub const OAUTH_STATE_COOKIE: &str = "oauth_state";

const OAUTH_STATE_PATH: &str = "/api/auth";

const OAUTH_STATE_MAX_AGE_SECS: i64 = 600;

fn issue_token(state: &AppState, user: &User) -> Result<String, AccountError> {
    state.tokens.issue(&Principal::from(user))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.register_handler().handle(req.into()).await?;
    let token = issue_token(&state, &user)?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.login_handler().handle(req.into()).await?;
    let token = issue_token(&state, &user)?;
    Ok(Json(TokenResponse { token }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Google OAuth
// ════════════════════════════════════════════════════════════════════════════════

fn state_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build((OAUTH_STATE_COOKIE, value))
        .http_only(true)
        .secure(state.frontend_url.starts_with("https://"))
        .same_site(SameSite::Lax)
        .path(OAUTH_STATE_PATH)
        .max_age(Duration::seconds(OAUTH_STATE_MAX_AGE_SECS))
        .into()
}

fn clear_state_cookie(cookies: &Cookies) {
    cookies.remove(Cookie::build((OAUTH_STATE_COOKIE, "")).path(OAUTH_STATE_PATH).into());
}

fn redirect(location: String) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

/// GET /api/auth/google
pub async fn google_login(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response, ApiError> {
    let provider = state
        .identity_provider
        .as_ref()
        .ok_or_else(|| AccountError::not_found("a federated login provider"))?;

    let request = provider.authorization_url();
    cookies.add(state_cookie(&state, request.state));
    Ok(redirect(request.url))
}

/// GET /api/auth/google/callback
///
/// Always redirects to the front-end: with `?token=` on success, to the
/// login page on any failure.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallbackParams>,
    cookies: Cookies,
) -> Result<Response, ApiError> {
    let provider = state
        .identity_provider
        .clone()
        .ok_or_else(|| AccountError::not_found("a federated login provider"))?;
    let failure = format!("{}/auth", state.frontend_url);

    let expected_state = cookies
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    clear_state_cookie(&cookies);

    if let Some(error) = &params.error {
        tracing::info!(error = %error, "google login declined");
        return Ok(redirect(failure));
    }

    let (Some(code), Some(returned_state)) = (params.code.as_deref(), params.state.as_deref()) else {
        tracing::warn!("google callback without code or state");
        return Ok(redirect(failure));
    };
    if expected_state.as_deref() != Some(returned_state) {
        tracing::warn!("google callback state mismatch");
        return Ok(redirect(failure));
    }

    let result = async {
        let profile = provider.exchange_code(code).await?;
        let login = state
            .federated_login_handler()
            .handle(FederatedLoginCommand { profile })
            .await?;
        issue_token(&state, &login.user)
    }
    .await;

    match result {
        Ok(token) => Ok(redirect(format!(
            "{}/auth/callback?token={}",
            state.frontend_url, token
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "google login failed");
            Ok(redirect(failure))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::JwtTokenIssuer;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::application::handlers::identity::test_support::PlainCredentialVerifier;
    use std::sync::Arc;

    fn state(frontend_url: &str) -> AppState {
        AppState::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PlainCredentialVerifier),
            Arc::new(JwtTokenIssuer::new("handler-test-secret-handler-test-secret")),
            Arc::new(MockPaymentProvider::new()),
            frontend_url,
        )
    }

    #[test]
    fn state_cookie_is_scoped_to_auth_routes() {
        let cookie = state_cookie(&state("http://localhost:5173"), "abc123".to_string());

        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/api/auth"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(600)));
        assert_ne!(cookie.secure(), Some(true));
    }

    #[test]
    fn state_cookie_is_secure_behind_https() {
        let cookie = state_cookie(&state("https://app.example.com"), "abc123".to_string());
        assert_eq!(cookie.secure(), Some(true));
    }
}
