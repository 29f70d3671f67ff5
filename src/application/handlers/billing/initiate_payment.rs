//! InitiatePaymentHandler - starts a prepaid charge or a subscription.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::billing::PlanCatalog;
use crate::ports::{
    CreateCustomerRequest, CreatePaymentIntentRequest, CreateSubscriptionRequest, PaymentError,
    PaymentProvider,
};

#[derive(Debug, Clone)]
pub struct InitiatePaymentCommand {
    pub name: Option<String>,
    pub email: String,
    pub payment_method: String,
    pub requested_plan: String,
}

/// Client secret the front-end uses to finish the payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitiatePaymentResult {
    PrepaidCharged { client_secret: Option<String> },
    SubscriptionStarted { client_secret: Option<String> },
}

impl InitiatePaymentResult {
    pub fn client_secret(&self) -> Option<&str> {
        match self {
            InitiatePaymentResult::PrepaidCharged { client_secret }
            | InitiatePaymentResult::SubscriptionStarted { client_secret } => {
                client_secret.as_deref()
            }
        }
    }
}

pub struct InitiatePaymentHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    catalog: PlanCatalog,
    micro_payment_amount: i64,
    currency: String,
}

impl InitiatePaymentHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        catalog: PlanCatalog,
        micro_payment_amount: i64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            payment_provider,
            catalog,
            micro_payment_amount,
            currency: currency.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: InitiatePaymentCommand,
    ) -> Result<InitiatePaymentResult, AccountError> {
        // 1. Validate input and resolve the plan
        if cmd.email.trim().is_empty() {
            return Err(AccountError::validation("email", "Email is required."));
        }
        if cmd.payment_method.trim().is_empty() {
            return Err(AccountError::validation(
                "paymentMethod",
                "Payment method is required.",
            ));
        }
        let plan = self.catalog.find(&cmd.requested_plan).ok_or_else(|| {
            AccountError::validation(
                "requestedPlan",
                format!("Unknown plan: {}", cmd.requested_plan),
            )
        })?;

        let product = self
            .payment_provider
            .retrieve_product(&plan.product_id)
            .await
            .map_err(upstream)?;

        // 2. Find or create the customer, making this card the default
        let existing = self
            .payment_provider
            .find_customer_by_email(&cmd.email)
            .await
            .map_err(upstream)?;
        let customer = match existing {
            Some(customer) => {
                self.payment_provider
                    .attach_payment_method(&customer.id, &cmd.payment_method)
                    .await
                    .map_err(upstream)?;
                customer
            }
            None => self
                .payment_provider
                .create_customer(CreateCustomerRequest {
                    email: cmd.email.clone(),
                    name: cmd.name.clone(),
                    payment_method: cmd.payment_method.clone(),
                })
                .await
                .map_err(upstream)?,
        };

        // 3. Charge once or subscribe
        if plan.is_pay_per_use() {
            let intent = self
                .payment_provider
                .create_payment_intent(CreatePaymentIntentRequest {
                    amount: self.micro_payment_amount,
                    currency: self.currency.clone(),
                    customer_id: customer.id.clone(),
                    payment_method: cmd.payment_method,
                    product_id: product.id,
                })
                .await
                .map_err(upstream)?;
            let confirmed = self
                .payment_provider
                .confirm_payment_intent(&intent.id)
                .await
                .map_err(upstream)?;

            tracing::info!(customer_id = %customer.id, plan = %plan.license, "prepaid payment confirmed");
            return Ok(InitiatePaymentResult::PrepaidCharged {
                client_secret: confirmed.client_secret,
            });
        }

        let price_id = product.default_price.ok_or_else(|| {
            AccountError::upstream(format!("Product {} has no default price", product.id))
        })?;
        let subscription = self
            .payment_provider
            .create_subscription(CreateSubscriptionRequest {
                customer_id: customer.id.clone(),
                price_id,
            })
            .await
            .map_err(upstream)?;

        tracing::info!(customer_id = %customer.id, plan = %plan.license, "subscription initiated");
        Ok(InitiatePaymentResult::SubscriptionStarted {
            client_secret: subscription.client_secret,
        })
    }
}

fn upstream(err: PaymentError) -> AccountError {
    tracing::warn!(code = %err.code, "payment provider call failed: {}", err.message);
    AccountError::upstream(err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::billing::PAY_PER_USE;
    use crate::ports::Customer;

    fn setup() -> (InitiatePaymentHandler, MockPaymentProvider) {
        let catalog = PlanCatalog::default();
        let provider = MockPaymentProvider::with_products(
            catalog.plans().iter().map(|p| p.product_id.as_str()),
        );
        let handler =
            InitiatePaymentHandler::new(Arc::new(provider.clone()), catalog, 1000, "usd");
        (handler, provider)
    }

    fn command(plan: &str) -> InitiatePaymentCommand {
        InitiatePaymentCommand {
            name: Some("Alice".to_string()),
            email: "a@x.com".to_string(),
            payment_method: "pm_card".to_string(),
            requested_plan: plan.to_string(),
        }
    }

    #[tokio::test]
    async fn pay_per_use_creates_and_confirms_micro_payment() {
        let (handler, provider) = setup();

        let result = handler.handle(command(PAY_PER_USE)).await.unwrap();

        assert!(matches!(result, InitiatePaymentResult::PrepaidCharged { .. }));
        assert!(result.client_secret().is_some());
        let intent_call = provider
            .calls()
            .into_iter()
            .find(|c| c.method == "create_payment_intent")
            .unwrap();
        assert_eq!(intent_call.args[1], "1000");
        assert_eq!(intent_call.args[2], "usd");
        assert!(provider.was_called("confirm_payment_intent"));
        assert!(!provider.was_called("create_subscription"));
    }

    #[tokio::test]
    async fn other_plans_subscribe_on_default_price() {
        let (handler, provider) = setup();

        let result = handler.handle(command("Business")).await.unwrap();

        assert!(matches!(result, InitiatePaymentResult::SubscriptionStarted { .. }));
        let call = provider
            .calls()
            .into_iter()
            .find(|c| c.method == "create_subscription")
            .unwrap();
        assert_eq!(call.args[1], "price_prod_O2pb3d");
    }

    #[tokio::test]
    async fn existing_customer_gets_payment_method_attached() {
        let (handler, provider) = setup();
        provider.add_customer(Customer {
            id: "cus_existing".to_string(),
            email: Some("a@x.com".to_string()),
            name: None,
        });

        handler.handle(command("Starter")).await.unwrap();

        assert!(!provider.was_called("create_customer"));
        assert_eq!(
            provider.default_payment_method("cus_existing").as_deref(),
            Some("pm_card")
        );
    }

    #[tokio::test]
    async fn unknown_plan_is_validation_error() {
        let (handler, provider) = setup();

        let result = handler.handle(command("Platinum")).await;

        assert!(matches!(
            result,
            Err(AccountError::Validation { ref field, .. }) if field == "requestedPlan"
        ));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn provider_error_message_is_forwarded() {
        let (handler, provider) = setup();
        provider.set_method_error(
            "create_subscription",
            PaymentError::card_declined("Your card was declined."),
        );

        let result = handler.handle(command("Advanced")).await;

        assert_eq!(
            result,
            Err(AccountError::Upstream("Your card was declined.".to_string()))
        );
    }
}
