//! Applicant identifiers.
//!
//! The KYC provider echoes back the `externalUserId` we registered the
//! applicant under, formatted `<email>_<opaque suffix>`.

/// Extracts the email prefix from a composite applicant id.
///
/// Hostnames cannot contain `_`, so the first `_` after the `@` is the
/// delimiter even when the local part has underscores of its own. Without an
/// `@` the first `_` is used; without any `_` the whole id is returned.
pub fn email_from_external_user_id(external_user_id: &str) -> &str {
    let search_from = external_user_id.find('@').unwrap_or(0);
    match external_user_id[search_from..].find('_') {
        Some(offset) => &external_user_id[..search_from + offset],
        None => external_user_id,
    }
}
