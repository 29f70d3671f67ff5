//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors)
//! - `account` - The user record, bearer principal and account transitions
//! - `billing` - Plan catalog and typed payment webhook events
//! - `kyc` - Typed KYC webhook events and applicant-id parsing

pub mod account;
pub mod billing;
pub mod foundation;
pub mod kyc;
