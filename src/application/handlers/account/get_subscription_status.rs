//! GetSubscriptionStatusHandler - Query handler for paid-access status.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetSubscriptionStatusQuery {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    NotActive,
}

impl SubscriptionStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::NotActive => "not active",
        }
    }
}

pub struct GetSubscriptionStatusHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetSubscriptionStatusHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Active when the account has a subscription or prepaid credit.
    /// An email with no account reads as not active.
    pub async fn handle(
        &self,
        query: GetSubscriptionStatusQuery,
    ) -> Result<SubscriptionStatus, AccountError> {
        let user = self.repository.find_by_email(&query.email).await?;
        Ok(match user {
            Some(user) if user.has_paid_access() => SubscriptionStatus::Active,
            _ => SubscriptionStatus::NotActive,
        })
    }
}
