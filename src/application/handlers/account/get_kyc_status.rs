//! GetKycStatusHandler - Query handler for the caller's KYC state.

use std::sync::Arc;

use crate::domain::account::{AccountError, Verified};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetKycStatusQuery {
    pub email: String,
}

pub struct GetKycStatusHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetKycStatusHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetKycStatusQuery) -> Result<Verified, AccountError> {
        self.repository
            .find_by_email(&query.email)
            .await?
            .map(|user| user.verified)
            .ok_or_else(|| AccountError::not_found("the user"))
    }
}
