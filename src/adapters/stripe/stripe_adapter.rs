//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API using
//! form-encoded requests and basic auth with the secret key.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentErrorCode, PaymentIntent, PaymentProvider, Product, Subscription,
};

use super::api_types::{
    StripeCustomer, StripeErrorResponse, StripePaymentIntent, StripeProduct, StripeSearchResult,
    StripeSubscription,
};

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.api_base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let request = self
            .http_client
            .get(self.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .query(query);
        send(request, path).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let request = self
            .http_client
            .post(self.url(path))
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params);
        send(request, path).await
    }
}

async fn send<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    path: &str,
) -> Result<T, PaymentError> {
    let response = request
        .send()
        .await
        .map_err(|e| PaymentError::network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(path, status = status.as_u16(), error = %body, "Stripe request failed");
        return Err(match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(parsed) => parsed.error.into_payment_error(status.as_u16()),
            Err(_) => PaymentError::provider(format!("Stripe API error: {}", body)),
        });
    }

    response.json().await.map_err(|e| {
        PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
    })
}

/// Builds a search query matching `email` exactly.
fn email_search_query(email: &str) -> String {
    format!("email:'{}'", email.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn retrieve_product(&self, product_id: &str) -> Result<Product, PaymentError> {
        let product: StripeProduct = self.get(&format!("products/{}", product_id), &[]).await?;
        Ok(product.into())
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, PaymentError> {
        let result: StripeSearchResult<StripeCustomer> = self
            .get("customers/search", &[("query", email_search_query(email))])
            .await?;

        Ok(result
            .data
            .into_iter()
            .find(|customer| !customer.deleted)
            .map(Customer::from))
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        let mut params = vec![
            ("email", request.email.clone()),
            ("payment_method", request.payment_method.clone()),
            (
                "invoice_settings[default_payment_method]",
                request.payment_method,
            ),
        ];
        if let Some(name) = request.name {
            params.push(("name", name));
        }

        let customer: StripeCustomer = self.post("customers", &params).await?;
        tracing::info!(customer_id = %customer.id, "Stripe customer created");
        Ok(customer.into())
    }

    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method: &str,
    ) -> Result<(), PaymentError> {
        let _: serde_json::Value = self
            .post(
                &format!("payment_methods/{}/attach", payment_method),
                &[("customer", customer_id.to_string())],
            )
            .await?;

        let _: StripeCustomer = self
            .post(
                &format!("customers/{}", customer_id),
                &[(
                    "invoice_settings[default_payment_method]",
                    payment_method.to_string(),
                )],
            )
            .await?;

        Ok(())
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let params = [
            ("amount", request.amount.to_string()),
            ("currency", request.currency),
            ("customer", request.customer_id),
            ("payment_method", request.payment_method),
            ("metadata[product_id]", request.product_id),
        ];

        let intent: StripePaymentIntent = self.post("payment_intents", &params).await?;
        Ok(intent.into())
    }

    async fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let intent: StripePaymentIntent = self
            .post(&format!("payment_intents/{}/confirm", payment_intent_id), &[])
            .await?;
        Ok(intent.into())
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        let params = [
            ("customer", request.customer_id),
            ("items[0][price]", request.price_id),
            ("expand[]", "latest_invoice.payment_intent".to_string()),
        ];

        let subscription: StripeSubscription = self.post("subscriptions", &params).await?;
        Ok(subscription.into())
    }

    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, PaymentError> {
        let result: Result<StripeCustomer, PaymentError> =
            self.get(&format!("customers/{}", customer_id), &[]).await;

        match result {
            Ok(customer) if customer.deleted => Ok(None),
            Ok(customer) => Ok(Some(customer.into())),
            Err(e) if e.code == PaymentErrorCode::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_new_sets_default_base_url() {
        let config = StripeConfig::new("sk_test_key");
        assert_eq!(config.api_base_url, "https://api.stripe.com");
    }

    #[test]
    fn config_with_base_url() {
        let config = StripeConfig::new("key").with_base_url("http://localhost:12111");
        assert_eq!(config.api_base_url, "http://localhost:12111");
    }

    #[test]
    fn urls_are_versioned() {
        let adapter = StripePaymentAdapter::new(StripeConfig::new("key"));
        assert_eq!(adapter.url("customers"), "https://api.stripe.com/v1/customers");
        assert_eq!(
            adapter.url("payment_intents/pi_1/confirm"),
            "https://api.stripe.com/v1/payment_intents/pi_1/confirm"
        );
    }

    #[test]
    fn email_search_query_quotes_the_address() {
        assert_eq!(email_search_query("a@x.com"), "email:'a@x.com'");
        assert_eq!(email_search_query("o'neil@x.com"), "email:'o\\'neil@x.com'");
    }
}
