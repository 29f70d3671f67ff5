//! Mapping from account errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::account::AccountError;
use crate::domain::foundation::{DomainError, WebhookError};

/// JSON error body: `{"message": "...", "code": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Error returned by every JSON handler.
///
/// Upstream failures are 502 by default. Checkout forwards them to the
/// caller as 400 so the front-end can show the provider's message.
#[derive(Debug)]
pub struct ApiError {
    error: AccountError,
    upstream_status: StatusCode,
}

impl ApiError {
    /// Error for the checkout route, where provider failures are the caller's problem.
    pub fn checkout(error: AccountError) -> Self {
        Self {
            error,
            upstream_status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            AccountError::Validation { .. } => StatusCode::BAD_REQUEST,
            AccountError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AccountError::InvalidToken => StatusCode::FORBIDDEN,
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::Conflict(_) => StatusCode::CONFLICT,
            AccountError::Upstream(_) => self.upstream_status,
            AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        Self {
            error,
            upstream_status: StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        AccountError::from(error).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }

        let body = ErrorResponse::new(self.error.code(), self.error.message());
        (status, Json(body)).into_response()
    }
}

/// Error returned by the webhook receivers.
///
/// The status tells the sender whether to redeliver: 4xx never, 5xx maybe.
#[derive(Debug)]
pub struct WebhookApiError(pub WebhookError);

impl WebhookApiError {
    fn code(&self) -> &'static str {
        match &self.0 {
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange => "INVALID_SIGNATURE",
            WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => "INVALID_PAYLOAD",
            WebhookError::UserNotFound(_) => "NOT_FOUND",
            WebhookError::Upstream(_) => "UPSTREAM_SERVICE_ERROR",
            WebhookError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<WebhookError> for WebhookApiError {
    fn from(error: WebhookError) -> Self {
        Self(error)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "webhook processing failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "webhook rejected");
        }

        let message = match &self.0 {
            WebhookError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorResponse::new(self.code(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_mapping() {
        let cases = [
            (AccountError::validation("email", "Missing credentials"), StatusCode::BAD_REQUEST),
            (AccountError::unauthorized("nope"), StatusCode::UNAUTHORIZED),
            (AccountError::InvalidToken, StatusCode::FORBIDDEN),
            (AccountError::not_found("the user"), StatusCode::NOT_FOUND),
            (AccountError::conflict("Email already in use."), StatusCode::CONFLICT),
            (AccountError::upstream("stripe down"), StatusCode::BAD_GATEWAY),
            (AccountError::infrastructure("db"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status(), expected);
        }
    }

    #[test]
    fn checkout_upstream_is_bad_request() {
        let error = ApiError::checkout(AccountError::upstream("Your card was declined."));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn body_carries_message_and_code() {
        let response = ApiError::from(AccountError::InvalidToken).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["message"], "failed");
        assert_eq!(body["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn infrastructure_details_are_hidden() {
        let response =
            ApiError::from(AccountError::infrastructure("connection refused")).into_response();

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn webhook_signature_failure_is_unauthorized() {
        let response = WebhookApiError(WebhookError::InvalidSignature).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid signature");
        assert_eq!(body["code"], "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn webhook_database_details_are_hidden() {
        let response =
            WebhookApiError(WebhookError::Database("pool timed out".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
