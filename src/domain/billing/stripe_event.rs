//! Stripe webhook envelope.
//!
//! Only fields relevant to our processing are captured. Envelope metadata is
//! optional so hand-crafted test deliveries still parse.

use serde::{Deserialize, Serialize};

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    #[serde(default)]
    pub id: String,

    /// Type of event (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default)]
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Reads a string field from the data object.
    pub fn object_str(&self, field: &str) -> Option<&str> {
        self.data.object.get(field).and_then(serde_json::Value::as_str)
    }

    /// Reads an integer field from the data object.
    pub fn object_i64(&self, field: &str) -> Option<i64> {
        self.data.object.get(field).and_then(serde_json::Value::as_i64)
    }
}

/// Builder for creating test StripeEvent instances.
#[cfg(test)]
pub struct StripeEventBuilder {
    id: String,
    event_type: String,
    created: i64,
    object: serde_json::Value,
}

#[cfg(test)]
impl Default for StripeEventBuilder {
    fn default() -> Self {
        Self {
            id: "evt_test_123".to_string(),
            event_type: "payment_intent.succeeded".to_string(),
            created: chrono::Utc::now().timestamp(),
            object: serde_json::json!({}),
        }
    }
}

#[cfg(test)]
impl StripeEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn object(mut self, object: serde_json::Value) -> Self {
        self.object = object;
        self
    }

    pub fn build(self) -> StripeEvent {
        StripeEvent {
            id: self.id,
            event_type: self.event_type,
            created: self.created,
            data: StripeEventData {
                object: self.object,
            },
            livemode: false,
        }
    }
}
