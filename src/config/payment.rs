//! Payment configuration

use serde::Deserialize;

use crate::domain::billing::{Plan, PlanCatalog};

use super::error::ValidationError;

/// Stripe credentials and checkout parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_api_key: String,

    /// Webhook signing secret; signatures are enforced when set
    pub stripe_webhook_secret: Option<String>,

    /// Pay-per-use charge in minor currency units
    #[serde(default = "default_micro_payment_amount")]
    pub micro_payment_amount: i64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Plan catalog as `License=prod_id` pairs, comma separated.
    /// The built-in catalog is used when unset.
    pub plans: Option<String>,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    /// Parses the configured plan list.
    pub fn catalog(&self) -> Result<PlanCatalog, ValidationError> {
        let Some(raw) = self.plans.as_deref() else {
            return Ok(PlanCatalog::default());
        };

        let plans = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once('=') {
                Some((license, product)) if !license.trim().is_empty() && !product.trim().is_empty() => {
                    Ok(Plan::new(license.trim(), product.trim()))
                }
                _ => Err(ValidationError::InvalidPlan(entry.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = PlanCatalog::new(plans);
        if catalog.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__PLANS"));
        }
        Ok(catalog)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE_API_KEY"));
        }

        // Verify key prefixes for safety
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }

        if self.micro_payment_amount <= 0 {
            return Err(ValidationError::InvalidMicroPaymentAmount);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency(self.currency.clone()));
        }

        self.catalog()?;
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: None,
            micro_payment_amount: default_micro_payment_amount(),
            currency: default_currency(),
            plans: None,
        }
    }
}

fn default_micro_payment_amount() -> i64 {
    1000
}

fn default_currency() -> String {
    "usd".to_string()
}
