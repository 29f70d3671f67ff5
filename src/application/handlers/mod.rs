//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod billing;
pub mod identity;
pub mod kyc;
