//! The user record and its enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Account role tag carried in the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Customer,
    Sales,
    Demo,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
            Role::Sales => "SALES",
            Role::Demo => "DEMO",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CUSTOMER" => Ok(Role::Customer),
            "SALES" => Ok(Role::Sales),
            "DEMO" => Ok(Role::Demo),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// KYC verification state.
///
/// Every state is reachable from every other one; the KYC provider may reset
/// or re-review an applicant at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verified {
    #[default]
    No,
    Pending,
    Hold,
    Yes,
    Rejected,
}

impl Verified {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verified::No => "NO",
            Verified::Pending => "PENDING",
            Verified::Hold => "HOLD",
            Verified::Yes => "YES",
            Verified::Rejected => "REJECTED",
        }
    }

    /// Status text reported by the KYC status query.
    pub fn status_message(&self) -> &'static str {
        match self {
            Verified::No => "not verified",
            Verified::Yes => "verified",
            Verified::Rejected => "rejected",
            Verified::Pending => "pending",
            Verified::Hold => "hold",
        }
    }
}

impl fmt::Display for Verified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verified {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NO" => Ok(Verified::No),
            "PENDING" => Ok(Verified::Pending),
            "HOLD" => Ok(Verified::Hold),
            "YES" => Ok(Verified::Yes),
            "REJECTED" => Ok(Verified::Rejected),
            other => Err(ValidationError::invalid_format(
                "verified",
                format!("unknown verification state '{}'", other),
            )),
        }
    }
}

/// Stored card details. Not touched by any account transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_holder_name: String,
    pub expiration_date: String,
    pub cvv: String,
}

/// Billing address and contact. Not touched by any account transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    pub street: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub billing_email: String,
    pub billing_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

/// A persisted user account.
///
/// `id` and `registered_at` are assigned by the store and never change.
/// `verified` and the three commercial flags only change through
/// [`AccountTransition`](super::AccountTransition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    /// Password hash. Absent for federation-only accounts.
    pub password: Option<String>,
    pub google_id: Option<String>,
    pub role: Role,
    pub verified: Verified,
    pub has_active_subscription: bool,
    pub has_active_prepaid: bool,
    pub has_purchase_history: bool,
    pub payment_details: Option<PaymentDetails>,
    pub billing_info: Option<BillingInfo>,
    pub registered_at: Timestamp,
}

impl User {
    /// True when the account may use paid features (subscription or prepaid credit).
    pub fn has_paid_access(&self) -> bool {
        self.has_active_subscription || self.has_active_prepaid
    }

    pub fn is_federated(&self) -> bool {
        self.google_id.is_some()
    }
}

/// Input for creating a user. The store assigns id and registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: Option<String>,
    pub google_id: Option<String>,
    pub role: Role,
}

impl NewUser {
    /// A password-based account. `password_hash` must already be hashed.
    pub fn with_password(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password: Some(password_hash.into()),
            google_id: None,
            role: Role::Customer,
        }
    }

    /// A federation-only account.
    pub fn federated(
        email: impl Into<String>,
        full_name: impl Into<String>,
        google_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password: None,
            google_id: Some(google_id.into()),
            role: Role::Customer,
        }
    }

    /// Materializes the record with store-assigned identity and default state.
    pub fn into_user(self, id: UserId, registered_at: Timestamp) -> User {
        User {
            id,
            email: self.email,
            full_name: self.full_name,
            password: self.password,
            google_id: self.google_id,
            role: self.role,
            verified: Verified::No,
            has_active_subscription: false,
            has_active_prepaid: false,
            has_purchase_history: false,
            payment_details: None,
            billing_info: None,
            registered_at,
        }
    }
}
