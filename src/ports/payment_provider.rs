//! Payment provider port for external payment processing.
//!
//! Covers what checkout and webhook handling need from the provider:
//! product lookup, customer management, one-off payment intents and
//! subscriptions. Webhook authenticity lives in the billing domain.

use crate::domain::foundation::{DomainError, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Retrieve a product by provider ID.
    async fn retrieve_product(&self, product_id: &str) -> Result<Product, PaymentError>;

    /// Find the customer registered under `email`, if any.
    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, PaymentError>;

    /// Create a customer with `payment_method` as its invoice default.
    async fn create_customer(&self, request: CreateCustomerRequest)
        -> Result<Customer, PaymentError>;

    /// Attach a payment method to a customer and make it the invoice default.
    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method: &str,
    ) -> Result<(), PaymentError>;

    /// Create a one-off payment intent.
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Confirm a previously created payment intent.
    async fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Create a subscription on a recurring price.
    ///
    /// The returned client secret belongs to the first invoice's payment intent.
    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError>;

    /// Get customer by provider ID.
    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, PaymentError>;
}

/// Product in the payment system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
    /// Price used when subscribing to this product.
    pub default_price: Option<String>,
}

/// Customer in the payment system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID.
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub email: String,
    pub name: Option<String>,
    pub payment_method: String,
}

/// Request to create a one-off payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub customer_id: String,
    pub payment_method: String,
    /// Recorded as metadata on the intent.
    pub product_id: String,
}

/// One-off payment intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    pub client_secret: Option<String>,
}

/// Request to create a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub customer_id: String,
    pub price_id: String,
}

/// Subscription in the payment system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer_id: String,
    pub status: String,
    pub client_secret: Option<String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message, forwarded to checkout callers.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    pub fn card_declined(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::CardDeclined, message)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(PaymentErrorCode::NotFound, format!("{} not found", resource))
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(ErrorCode::ExternalServiceError, err.message)
            .with_detail("payment_code", err.code.to_string())
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Card was declined.
    CardDeclined,

    /// Request rejected as invalid by the provider.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::CardDeclined => "card_declined",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
