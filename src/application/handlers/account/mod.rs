//! Account handlers - the state machine and status queries.

mod get_kyc_status;
mod get_subscription_status;
mod state_machine;

pub use get_kyc_status::{GetKycStatusHandler, GetKycStatusQuery};
pub use get_subscription_status::{
    GetSubscriptionStatusHandler, GetSubscriptionStatusQuery, SubscriptionStatus,
};
pub use state_machine::AccountStateMachine;
