//! Stripe API objects as returned by the REST endpoints.
//!
//! Only the fields the adapter reads are modeled. Unknown fields are ignored
//! so new API versions do not break parsing.

use serde::Deserialize;

use crate::ports::{Customer, PaymentError, PaymentErrorCode, PaymentIntent, Product, Subscription};

/// A field Stripe returns either as an id or, when expanded, as the object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Id(String),
    Object(Box<T>),
}

impl<T> Expandable<T> {
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(object) => Some(object),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeProduct {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub default_price: Option<Expandable<StripePrice>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePrice {
    pub id: String,
}

impl From<StripeProduct> for Product {
    fn from(product: StripeProduct) -> Self {
        let default_price = product.default_price.map(|price| match price {
            Expandable::Id(id) => id,
            Expandable::Object(price) => price.id,
        });
        Product {
            id: product.id,
            name: product.name,
            default_price,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCustomer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl From<StripeCustomer> for Customer {
    fn from(customer: StripeCustomer) -> Self {
        Customer {
            id: customer.id,
            email: customer.email,
            name: customer.name,
        }
    }
}

/// Result page of `GET /v1/customers/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeSearchResult<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl From<StripePaymentIntent> for PaymentIntent {
    fn from(intent: StripePaymentIntent) -> Self {
        PaymentIntent {
            id: intent.id,
            status: intent.status,
            client_secret: intent.client_secret,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeInvoice {
    pub id: String,
    #[serde(default)]
    pub payment_intent: Option<Expandable<StripePaymentIntent>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeSubscription {
    pub id: String,
    pub customer: String,
    pub status: String,
    #[serde(default)]
    pub latest_invoice: Option<Expandable<StripeInvoice>>,
}

impl From<StripeSubscription> for Subscription {
    fn from(subscription: StripeSubscription) -> Self {
        let client_secret = subscription
            .latest_invoice
            .as_ref()
            .and_then(Expandable::as_object)
            .and_then(|invoice| invoice.payment_intent.as_ref())
            .and_then(Expandable::as_object)
            .and_then(|intent| intent.client_secret.clone());

        Subscription {
            id: subscription.id,
            customer_id: subscription.customer,
            status: subscription.status,
            client_secret,
        }
    }
}

/// Body of a non-2xx Stripe response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeApiError {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StripeApiError {
    /// Maps an error body and HTTP status to a port error.
    pub fn into_payment_error(self, status: u16) -> PaymentError {
        let code = match (status, self.error_type.as_deref()) {
            (_, Some("card_error")) => PaymentErrorCode::CardDeclined,
            (401, _) => PaymentErrorCode::AuthenticationError,
            (404, _) => PaymentErrorCode::NotFound,
            (429, _) => PaymentErrorCode::RateLimitExceeded,
            (400, _) | (_, Some("invalid_request_error")) => PaymentErrorCode::InvalidRequest,
            _ => PaymentErrorCode::ProviderError,
        };
        let message = self
            .message
            .unwrap_or_else(|| format!("Stripe API error (HTTP {})", status));

        let error = PaymentError::new(code, message);
        match self.code {
            Some(provider_code) => error.with_provider_code(provider_code),
            None => error,
        }
    }
}
