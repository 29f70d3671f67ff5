//! Purchasable plans and the payment-provider products behind them.

use serde::{Deserialize, Serialize};

/// License name of the one-off prepaid plan.
pub const PAY_PER_USE: &str = "Pay per Use";

/// A plan offered to customers, keyed by its license name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub license: String,
    pub product_id: String,
}

impl Plan {
    pub fn new(license: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            product_id: product_id.into(),
        }
    }

    /// Prepaid plans are charged once; every other plan is a subscription.
    pub fn is_pay_per_use(&self) -> bool {
        self.license == PAY_PER_USE
    }
}

/// Lookup table from license name to plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    /// Finds a plan by exact license name.
    pub fn find(&self, license: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.license == license)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::new(vec![
            Plan::new(PAY_PER_USE, "prod_O2k1ue"),
            Plan::new("Starter", "prod_O2pZ2g"),
            Plan::new("Advanced", "prod_O2paiz"),
            Plan::new("Business", "prod_O2pb3d"),
            Plan::new("Corporate", "prod_O2pbzN"),
            Plan::new("Custom", "prod_O2pcTO"),
        ])
    }
}
