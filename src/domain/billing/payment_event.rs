//! Typed payment webhook events.
//!
//! The Stripe envelope is classified once, at the boundary. Everything past
//! this point matches on [`PaymentEvent`] rather than on event-type strings.

use super::stripe_event::StripeEvent;
use crate::domain::account::AccountTransition;

const PAYMENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";
const SUBSCRIPTION_CREATED: &str = "customer.subscription.created";
const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";
const CHARGE_REFUNDED: &str = "charge.refunded";

/// A payment-provider event the account state machine understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentEvent {
    PaymentIntentSucceeded {
        customer_id: Option<String>,
        status: Option<String>,
        amount: Option<i64>,
    },
    SubscriptionCreated {
        customer_id: Option<String>,
        status: Option<String>,
    },
    SubscriptionDeleted {
        customer_id: Option<String>,
        status: Option<String>,
    },
    ChargeRefunded {
        customer_id: Option<String>,
        amount: Option<i64>,
    },
    /// Any other event type. Acknowledged without effect.
    Unrecognized(String),
}

impl PaymentEvent {
    /// Classifies a Stripe envelope.
    pub fn from_stripe(event: &StripeEvent) -> Self {
        let customer_id = customer_id(event);
        let status = event.object_str("status").map(str::to_string);
        let amount = event.object_i64("amount");

        match event.event_type.as_str() {
            PAYMENT_INTENT_SUCCEEDED => PaymentEvent::PaymentIntentSucceeded {
                customer_id,
                status,
                amount,
            },
            SUBSCRIPTION_CREATED => PaymentEvent::SubscriptionCreated {
                customer_id,
                status,
            },
            SUBSCRIPTION_DELETED => PaymentEvent::SubscriptionDeleted {
                customer_id,
                status,
            },
            CHARGE_REFUNDED => PaymentEvent::ChargeRefunded {
                customer_id,
                amount,
            },
            other => PaymentEvent::Unrecognized(other.to_string()),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            PaymentEvent::PaymentIntentSucceeded { .. } => PAYMENT_INTENT_SUCCEEDED,
            PaymentEvent::SubscriptionCreated { .. } => SUBSCRIPTION_CREATED,
            PaymentEvent::SubscriptionDeleted { .. } => SUBSCRIPTION_DELETED,
            PaymentEvent::ChargeRefunded { .. } => CHARGE_REFUNDED,
            PaymentEvent::Unrecognized(kind) => kind,
        }
    }

    pub fn customer_id(&self) -> Option<&str> {
        match self {
            PaymentEvent::PaymentIntentSucceeded { customer_id, .. }
            | PaymentEvent::SubscriptionCreated { customer_id, .. }
            | PaymentEvent::SubscriptionDeleted { customer_id, .. }
            | PaymentEvent::ChargeRefunded { customer_id, .. } => customer_id.as_deref(),
            PaymentEvent::Unrecognized(_) => None,
        }
    }

    /// Account transitions this event triggers, in application order.
    ///
    /// `micro_payment_amount` is the pay-per-use unit in minor currency units.
    /// An empty result means the event carries no state change.
    pub fn transitions(&self, micro_payment_amount: i64) -> Vec<AccountTransition> {
        match self {
            PaymentEvent::PaymentIntentSucceeded { status, amount, .. } => {
                if status.as_deref() != Some("succeeded") {
                    return Vec::new();
                }
                let mut transitions = vec![AccountTransition::PurchaseRecorded];
                if *amount == Some(micro_payment_amount) {
                    transitions.push(AccountTransition::PrepaidActivated);
                }
                transitions
            }
            PaymentEvent::SubscriptionCreated { status, .. } if status.as_deref() == Some("active") => {
                vec![AccountTransition::SubscriptionActivated]
            }
            PaymentEvent::SubscriptionDeleted { status, .. }
                if status.as_deref() == Some("canceled") =>
            {
                vec![AccountTransition::SubscriptionCanceled]
            }
            PaymentEvent::ChargeRefunded { amount, .. } if *amount == Some(micro_payment_amount) => {
                vec![AccountTransition::PrepaidRevoked]
            }
            _ => Vec::new(),
        }
    }
}

/// Customer reference as either a bare id or an expanded customer object.
fn customer_id(event: &StripeEvent) -> Option<String> {
    match event.data.object.get("customer")? {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Object(customer) => customer
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
