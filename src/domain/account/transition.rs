//! Account state transitions driven by payment and KYC webhooks.
//!
//! Each transition assigns exactly one field. Assignments are idempotent, so
//! a redelivered webhook leaves the account where the first delivery put it.
//! Reordered deliveries are not reconciled: the last write wins.

use super::{User, Verified};

/// A single state change requested by an external workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTransition {
    /// Any successful payment.
    PurchaseRecorded,
    /// Successful payment of the pay-per-use unit.
    PrepaidActivated,
    /// Refund of the pay-per-use unit.
    PrepaidRevoked,
    SubscriptionActivated,
    SubscriptionCanceled,
    KycStatusChanged(Verified),
}

impl AccountTransition {
    /// The field assignment this transition performs.
    pub fn patch(&self) -> AccountPatch {
        match self {
            AccountTransition::PurchaseRecorded => AccountPatch::HasPurchaseHistory(true),
            AccountTransition::PrepaidActivated => AccountPatch::HasActivePrepaid(true),
            AccountTransition::PrepaidRevoked => AccountPatch::HasActivePrepaid(false),
            AccountTransition::SubscriptionActivated => AccountPatch::HasActiveSubscription(true),
            AccountTransition::SubscriptionCanceled => AccountPatch::HasActiveSubscription(false),
            AccountTransition::KycStatusChanged(state) => AccountPatch::Verified(*state),
        }
    }

    /// Applies the transition to an in-memory copy of the user.
    pub fn apply(&self, user: User) -> User {
        self.patch().apply(user)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AccountTransition::PurchaseRecorded => "purchase_recorded",
            AccountTransition::PrepaidActivated => "prepaid_activated",
            AccountTransition::PrepaidRevoked => "prepaid_revoked",
            AccountTransition::SubscriptionActivated => "subscription_activated",
            AccountTransition::SubscriptionCanceled => "subscription_canceled",
            AccountTransition::KycStatusChanged(_) => "kyc_status_changed",
        }
    }
}

/// A set-only-this-field update.
///
/// Stores apply it atomically so concurrent transitions on different fields
/// of the same user cannot overwrite each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountPatch {
    Verified(Verified),
    HasActiveSubscription(bool),
    HasActivePrepaid(bool),
    HasPurchaseHistory(bool),
}

impl AccountPatch {
    pub fn apply(&self, mut user: User) -> User {
        match *self {
            AccountPatch::Verified(state) => user.verified = state,
            AccountPatch::HasActiveSubscription(value) => user.has_active_subscription = value,
            AccountPatch::HasActivePrepaid(value) => user.has_active_prepaid = value,
            AccountPatch::HasPurchaseHistory(value) => user.has_purchase_history = value,
        }
        user
    }

    /// Storage column touched by this patch.
    pub fn column(&self) -> &'static str {
        match self {
            AccountPatch::Verified(_) => "verified",
            AccountPatch::HasActiveSubscription(_) => "has_active_subscription",
            AccountPatch::HasActivePrepaid(_) => "has_active_prepaid",
            AccountPatch::HasPurchaseHistory(_) => "has_purchase_history",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::NewUser;
    use crate::domain::foundation::{Timestamp, UserId};

    fn fresh_user() -> User {
        NewUser::with_password("a@x.com", "Alice", "hash")
            .into_user(UserId::generate(), Timestamp::now())
    }

    #[test]
    fn purchase_recorded_sets_history_only() {
        let user = AccountTransition::PurchaseRecorded.apply(fresh_user());
        assert!(user.has_purchase_history);
        assert!(!user.has_active_prepaid);
        assert!(!user.has_active_subscription);
    }

    #[test]
    fn prepaid_revoked_keeps_purchase_history() {
        let user = AccountTransition::PurchaseRecorded.apply(fresh_user());
        let user = AccountTransition::PrepaidActivated.apply(user);
        let user = AccountTransition::PrepaidRevoked.apply(user);

        assert!(!user.has_active_prepaid);
        assert!(user.has_purchase_history);
    }

    #[test]
    fn subscription_activate_then_cancel() {
        let user = AccountTransition::SubscriptionActivated.apply(fresh_user());
        assert!(user.has_active_subscription);

        let user = AccountTransition::SubscriptionCanceled.apply(user);
        assert!(!user.has_active_subscription);
    }

    #[test]
    fn kyc_status_change_allows_any_state() {
        let user = AccountTransition::KycStatusChanged(Verified::Rejected).apply(fresh_user());
        assert_eq!(user.verified, Verified::Rejected);

        let user = AccountTransition::KycStatusChanged(Verified::No).apply(user);
        assert_eq!(user.verified, Verified::No);
    }

    #[test]
    fn transitions_are_idempotent() {
        let transitions = [
            AccountTransition::PurchaseRecorded,
            AccountTransition::PrepaidActivated,
            AccountTransition::PrepaidRevoked,
            AccountTransition::SubscriptionActivated,
            AccountTransition::SubscriptionCanceled,
            AccountTransition::KycStatusChanged(Verified::Yes),
        ];

        for transition in transitions {
            let once = transition.apply(fresh_user());
            let twice = transition.apply(once.clone());
            assert_eq!(once, twice, "{} not idempotent", transition.name());
        }
    }

    #[test]
    fn patch_columns_match_fields() {
        assert_eq!(AccountPatch::Verified(Verified::Hold).column(), "verified");
        assert_eq!(
            AccountTransition::PrepaidActivated.patch().column(),
            "has_active_prepaid"
        );
    }
}
