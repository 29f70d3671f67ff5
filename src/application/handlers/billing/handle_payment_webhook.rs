//! HandlePaymentWebhookHandler - Command handler for payment provider webhooks.

use std::sync::Arc;

use crate::application::handlers::account::AccountStateMachine;
use crate::domain::account::{AccountError, AccountTransition};
use crate::domain::billing::{PaymentEvent, StripeEvent, StripeWebhookVerifier};
use crate::domain::foundation::{UserId, WebhookError};
use crate::ports::{PaymentProvider, UserRepository};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header, if sent.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Transitions were applied to the account.
    Applied {
        user_id: UserId,
        transitions: Vec<AccountTransition>,
    },
    /// Recognized event whose status or amount triggers nothing.
    NoChange,
    /// No customer or no local account behind the event. Documented no-op.
    NoMatchingUser,
    /// Event type we don't handle.
    Ignored(String),
}

/// Handler for processing payment provider webhooks.
///
/// The target account is resolved by email: event customer id, then the
/// provider's customer record, then the local account with that email.
pub struct HandlePaymentWebhookHandler {
    repository: Arc<dyn UserRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    state_machine: Arc<AccountStateMachine>,
    verifier: Option<StripeWebhookVerifier>,
    micro_payment_amount: i64,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        state_machine: Arc<AccountStateMachine>,
        micro_payment_amount: i64,
    ) -> Self {
        Self {
            repository,
            payment_provider,
            state_machine,
            verifier: None,
            micro_payment_amount,
        }
    }

    /// Enforce `Stripe-Signature` on every delivery.
    pub fn with_verifier(mut self, verifier: StripeWebhookVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Authenticate (when configured) and parse
        let stripe_event = self.parse(&cmd)?;
        let event = PaymentEvent::from_stripe(&stripe_event);

        tracing::debug!(
            event_id = %stripe_event.id,
            event_type = event.kind(),
            "payment webhook received"
        );

        // 2. Classify
        if let PaymentEvent::Unrecognized(kind) = &event {
            return Ok(HandlePaymentWebhookResult::Ignored(kind.clone()));
        }
        let transitions = event.transitions(self.micro_payment_amount);
        if transitions.is_empty() {
            return Ok(HandlePaymentWebhookResult::NoChange);
        }

        // 3. Resolve the account behind the customer
        let Some(customer_id) = event.customer_id() else {
            tracing::warn!(event_type = event.kind(), "payment event without customer id");
            return Ok(HandlePaymentWebhookResult::NoMatchingUser);
        };

        let customer = self
            .payment_provider
            .get_customer(customer_id)
            .await
            .map_err(|e| WebhookError::Upstream(e.to_string()))?;
        let Some(email) = customer.and_then(|c| c.email) else {
            tracing::warn!(customer_id, "payment customer missing or has no email");
            return Ok(HandlePaymentWebhookResult::NoMatchingUser);
        };

        let user = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(|e| WebhookError::Database(e.to_string()))?;
        let Some(user) = user else {
            tracing::warn!(customer_id, "no account for payment customer");
            return Ok(HandlePaymentWebhookResult::NoMatchingUser);
        };

        // 4. Apply
        self.state_machine
            .apply_all(&user.id, &transitions)
            .await
            .map_err(to_webhook_error)?;

        Ok(HandlePaymentWebhookResult::Applied {
            user_id: user.id,
            transitions,
        })
    }

    fn parse(&self, cmd: &HandlePaymentWebhookCommand) -> Result<StripeEvent, WebhookError> {
        match &self.verifier {
            Some(verifier) => {
                let signature = cmd
                    .signature
                    .as_deref()
                    .ok_or(WebhookError::MissingSignature)?;
                verifier.verify_and_parse(&cmd.payload, signature)
            }
            None => serde_json::from_slice(&cmd.payload)
                .map_err(|e| WebhookError::ParseError(e.to_string())),
        }
    }
}

fn to_webhook_error(err: AccountError) -> WebhookError {
    match err {
        AccountError::NotFound(what) => WebhookError::UserNotFound(what),
        other => WebhookError::Database(other.to_string()),
    }
}
