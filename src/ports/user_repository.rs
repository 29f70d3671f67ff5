//! User repository port.
//!
//! # Design
//!
//! - **Email is unique**: `create` fails with `UserExists` instead of writing
//!   a second record, so concurrent registrations cannot both succeed
//! - **Field-level patches**: account transitions go through `apply_patch`,
//!   which sets one column atomically and never replaces the whole record

use crate::domain::account::{AccountPatch, NewUser, User};
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user, assigning its id and registration time.
    ///
    /// # Errors
    ///
    /// - `UserExists` if the email is already taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replaces the stored record for `user.id`.
    ///
    /// `id` and `registered_at` are never rewritten.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no record has this id
    /// - `UserExists` if the new email belongs to another user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Sets exactly the field named by `patch` and returns the fresh record.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no record has this id
    async fn apply_patch(&self, id: &UserId, patch: AccountPatch) -> Result<User, DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Exact (case-sensitive) email match. Returns `None` if not found.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
