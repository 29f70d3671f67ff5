//! Account domain - the user record and the trust/commercial state it carries.
//!
//! Identity is established elsewhere (password, federated login); this module
//! owns what a user *is* and how webhook-driven transitions change it.

mod errors;
mod principal;
mod transition;
mod user;

pub use errors::AccountError;
pub use principal::Principal;
pub use transition::{AccountPatch, AccountTransition};
pub use user::{BillingInfo, NewUser, PaymentDetails, Role, User, Verified};
