//! Bearer token port.

use crate::domain::account::{AccountError, Principal};

/// Encodes a [`Principal`] into a signed bearer token and back.
///
/// Decoding is offline: it never consults the user store, so a token keeps
/// describing the account as it was when issued.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// - `Infrastructure` if signing fails
    fn issue(&self, principal: &Principal) -> Result<String, AccountError>;

    /// # Errors
    ///
    /// - `InvalidToken` on a bad signature, malformed payload or expired token
    fn decode(&self, token: &str) -> Result<Principal, AccountError>;
}
