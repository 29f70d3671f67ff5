//! Shared application state for the HTTP routers.

use std::sync::Arc;

use crate::application::{
    AccountStateMachine, FederatedLoginHandler, GetKycStatusHandler,
    GetSubscriptionStatusHandler, HandleKycWebhookHandler, HandlePaymentWebhookHandler,
    InitiatePaymentHandler, LoginUserHandler, RegisterUserHandler,
};
use crate::domain::billing::{PlanCatalog, StripeWebhookVerifier};
use crate::domain::kyc::PayloadDigestVerifier;
use crate::ports::{
    CredentialVerifier, FederatedIdentityProvider, PaymentProvider, TokenIssuer, UserRepository,
};

/// Default pay-per-use charge, in minor currency units.
pub const DEFAULT_MICRO_PAYMENT_AMOUNT: i64 = 1000;

pub const DEFAULT_CURRENCY: &str = "usd";

/// Checkout parameters shared by the payment route and the payment webhook.
#[derive(Debug, Clone)]
pub struct BillingSettings {
    pub catalog: PlanCatalog,
    pub micro_payment_amount: i64,
    pub currency: String,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            catalog: PlanCatalog::default(),
            micro_payment_amount: DEFAULT_MICRO_PAYMENT_AMOUNT,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub identity_provider: Option<Arc<dyn FederatedIdentityProvider>>,
    pub state_machine: Arc<AccountStateMachine>,
    pub billing: BillingSettings,
    pub stripe_verifier: Option<StripeWebhookVerifier>,
    pub kyc_verifier: Option<PayloadDigestVerifier>,
    /// Base URL of the front-end that receives OAuth redirects.
    pub frontend_url: String,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialVerifier>,
        tokens: Arc<dyn TokenIssuer>,
        payment_provider: Arc<dyn PaymentProvider>,
        frontend_url: impl Into<String>,
    ) -> Self {
        let state_machine = Arc::new(AccountStateMachine::new(users.clone()));
        Self {
            users,
            credentials,
            tokens,
            payment_provider,
            identity_provider: None,
            state_machine,
            billing: BillingSettings::default(),
            stripe_verifier: None,
            kyc_verifier: None,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_identity_provider(mut self, provider: Arc<dyn FederatedIdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn with_billing(mut self, billing: BillingSettings) -> Self {
        self.billing = billing;
        self
    }

    pub fn with_stripe_verifier(mut self, verifier: StripeWebhookVerifier) -> Self {
        self.stripe_verifier = Some(verifier);
        self
    }

    pub fn with_kyc_verifier(mut self, verifier: PayloadDigestVerifier) -> Self {
        self.kyc_verifier = Some(verifier);
        self
    }

    // Handlers are cheap to build, so they are created per request.

    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone(), self.credentials.clone())
    }

    pub fn login_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(self.users.clone(), self.credentials.clone())
    }

    pub fn federated_login_handler(&self) -> FederatedLoginHandler {
        FederatedLoginHandler::new(self.users.clone())
    }

    pub fn subscription_status_handler(&self) -> GetSubscriptionStatusHandler {
        GetSubscriptionStatusHandler::new(self.users.clone())
    }

    pub fn kyc_status_handler(&self) -> GetKycStatusHandler {
        GetKycStatusHandler::new(self.users.clone())
    }

    pub fn initiate_payment_handler(&self) -> InitiatePaymentHandler {
        InitiatePaymentHandler::new(
            self.payment_provider.clone(),
            self.billing.catalog.clone(),
            self.billing.micro_payment_amount,
            self.billing.currency.clone(),
        )
    }

    pub fn payment_webhook_handler(&self) -> HandlePaymentWebhookHandler {
        let handler = HandlePaymentWebhookHandler::new(
            self.users.clone(),
            self.payment_provider.clone(),
            self.state_machine.clone(),
            self.billing.micro_payment_amount,
        );
        match &self.stripe_verifier {
            Some(verifier) => handler.with_verifier(verifier.clone()),
            None => handler,
        }
    }

    pub fn kyc_webhook_handler(&self) -> HandleKycWebhookHandler {
        let handler = HandleKycWebhookHandler::new(self.users.clone(), self.state_machine.clone());
        match &self.kyc_verifier {
            Some(verifier) => handler.with_verifier(verifier.clone()),
            None => handler,
        }
    }
}
