//! AccountStateMachine - persists account transitions.
//!
//! Every transition is written as a single-field patch, so two webhooks
//! racing on the same user (say a subscription and a KYC approval) each
//! keep their own field instead of one overwriting the other with a stale
//! copy of the record.

use std::sync::Arc;

use crate::domain::account::{AccountError, AccountTransition, User};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

pub struct AccountStateMachine {
    repository: Arc<dyn UserRepository>,
}

impl AccountStateMachine {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Applies one transition and returns the stored result.
    pub async fn apply(
        &self,
        user_id: &UserId,
        transition: AccountTransition,
    ) -> Result<User, AccountError> {
        let user = self
            .repository
            .apply_patch(user_id, transition.patch())
            .await?;

        tracing::info!(
            user_id = %user_id,
            transition = transition.name(),
            "account transition applied"
        );
        Ok(user)
    }

    /// Applies transitions in order. Returns `None` when given none.
    pub async fn apply_all(
        &self,
        user_id: &UserId,
        transitions: &[AccountTransition],
    ) -> Result<Option<User>, AccountError> {
        let mut latest = None;
        for transition in transitions {
            latest = Some(self.apply(user_id, *transition).await?);
        }
        Ok(latest)
    }
}
