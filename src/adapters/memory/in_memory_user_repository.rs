//! In-Memory User Repository Adapter
//!
//! Keeps user records in a process-local map. Useful for testing and
//! development; data is lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{AccountPatch, NewUser, User};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserRepository;

/// In-memory storage for user records, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn email_taken() -> DomainError {
    DomainError::new(ErrorCode::UserExists, "Email already in use.")
}

fn not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(email_taken());
        }
        let user = user.into_user(UserId::generate(), Timestamp::now());
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(email_taken());
        }
        let stored = users.get_mut(&user.id).ok_or_else(|| not_found(&user.id))?;
        let registered_at = stored.registered_at;
        *stored = User {
            registered_at,
            ..user.clone()
        };
        Ok(stored.clone())
    }

    async fn apply_patch(&self, id: &UserId, patch: AccountPatch) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(id).ok_or_else(|| not_found(id))?;
        *stored = patch.apply(stored.clone());
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}
