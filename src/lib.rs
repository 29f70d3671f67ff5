//! Account Service - user accounts, identity and webhook-driven account state.
//!
//! Users sign up with a password or through Google, receive a stateless bearer
//! token, and have their KYC and billing status updated asynchronously by the
//! payment and KYC providers' webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
