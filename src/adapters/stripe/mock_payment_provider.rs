//! Mock payment provider for testing.
//!
//! Provides a configurable in-memory implementation of `PaymentProvider` for
//! unit and integration tests. Supports:
//! - Seeded products and customers
//! - Error injection per method
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, Customer,
    PaymentError, PaymentIntent, PaymentProvider, Product, Subscription,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.add_customer(Customer { id: "cus_1".into(), email: Some("a@x.com".into()), name: None });
/// mock.set_method_error("create_subscription", PaymentError::card_declined("declined"));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    products: HashMap<String, Product>,
    customers: HashMap<String, Customer>,
    payment_intents: HashMap<String, PaymentIntent>,
    subscriptions: HashMap<String, Subscription>,
    /// Payment method attached per customer.
    default_payment_methods: HashMap<String, String>,
    /// Errors by method name.
    method_errors: HashMap<String, PaymentError>,
    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock seeded with the given products, each priced at `price_<product>`.
    pub fn with_products<'a>(product_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mock = Self::new();
        for id in product_ids {
            mock.add_product(Product {
                id: id.to_string(),
                name: None,
                default_price: Some(format!("price_{}", id)),
            });
        }
        mock
    }

    pub fn add_product(&self, product: Product) {
        self.state().products.insert(product.id.clone(), product);
    }

    pub fn add_customer(&self, customer: Customer) {
        self.state().customers.insert(customer.id.clone(), customer);
    }

    /// Make `method` fail until errors are cleared.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        self.state().method_errors.clear();
    }

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Payment method last attached to `customer_id`.
    pub fn default_payment_method(&self, customer_id: &str) -> Option<String> {
        self.state().default_payment_methods.get(customer_id).cloned()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, method: &str, args: Vec<String>) -> Result<(), PaymentError> {
        let mut state = self.state();
        state.call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
        match state.method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn mock_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_mock_{}", prefix, &uuid[..12])
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn retrieve_product(&self, product_id: &str) -> Result<Product, PaymentError> {
        self.enter("retrieve_product", vec![product_id.to_string()])?;
        self.state()
            .products
            .get(product_id)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("product"))
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, PaymentError> {
        self.enter("find_customer_by_email", vec![email.to_string()])?;
        Ok(self
            .state()
            .customers
            .values()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, PaymentError> {
        self.enter(
            "create_customer",
            vec![request.email.clone(), request.payment_method.clone()],
        )?;

        let customer = Customer {
            id: mock_id("cus"),
            email: Some(request.email),
            name: request.name,
        };
        let mut state = self.state();
        state
            .default_payment_methods
            .insert(customer.id.clone(), request.payment_method);
        state.customers.insert(customer.id.clone(), customer.clone());
        Ok(customer)
    }

    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method: &str,
    ) -> Result<(), PaymentError> {
        self.enter(
            "attach_payment_method",
            vec![customer_id.to_string(), payment_method.to_string()],
        )?;
        let mut state = self.state();
        if !state.customers.contains_key(customer_id) {
            return Err(PaymentError::not_found("customer"));
        }
        state
            .default_payment_methods
            .insert(customer_id.to_string(), payment_method.to_string());
        Ok(())
    }

    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        self.enter(
            "create_payment_intent",
            vec![
                request.customer_id.clone(),
                request.amount.to_string(),
                request.currency.clone(),
            ],
        )?;
        let id = mock_id("pi");
        let intent = PaymentIntent {
            client_secret: Some(format!("{}_secret", id)),
            id: id.clone(),
            status: "requires_confirmation".to_string(),
        };
        self.state().payment_intents.insert(id, intent.clone());
        Ok(intent)
    }

    async fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.enter("confirm_payment_intent", vec![payment_intent_id.to_string()])?;
        let mut state = self.state();
        let intent = state
            .payment_intents
            .get_mut(payment_intent_id)
            .ok_or_else(|| PaymentError::not_found("payment intent"))?;
        intent.status = "succeeded".to_string();
        Ok(intent.clone())
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        self.enter(
            "create_subscription",
            vec![request.customer_id.clone(), request.price_id.clone()],
        )?;
        let id = mock_id("sub");
        let subscription = Subscription {
            id: id.clone(),
            customer_id: request.customer_id,
            status: "incomplete".to_string(),
            client_secret: Some(format!("pi_for_{}_secret", id)),
        };
        self.state().subscriptions.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, PaymentError> {
        self.enter("get_customer", vec![customer_id.to_string()])?;
        Ok(self.state().customers.get(customer_id).cloned())
    }
}
