//! RegisterUserHandler - Command handler for password sign-up.

use std::sync::Arc;

use super::hash_password;
use crate::domain::account::{AccountError, NewUser, User};
use crate::ports::{CredentialVerifier, UserRepository};

/// Command to register a password-based account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Handler for password registration.
pub struct RegisterUserHandler {
    repository: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl RegisterUserHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<User, AccountError> {
        if cmd.email.trim().is_empty() {
            return Err(AccountError::validation("email", "Email is required."));
        }
        if cmd.password.is_empty() {
            return Err(AccountError::validation("password", "Password is required."));
        }
        let full_name = cmd
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AccountError::validation("fullName", "Full name is required."))?
            .to_string();

        if self.repository.find_by_email(&cmd.email).await?.is_some() {
            return Err(AccountError::conflict("Email already in use."));
        }

        let password_hash = hash_password(&self.credentials, &cmd.password).await?;

        // The store's unique index still decides a concurrent registration race.
        let user = self
            .repository
            .create(NewUser::with_password(cmd.email, full_name, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::application::handlers::identity::test_support::PlainCredentialVerifier;
    use crate::domain::account::{Role, Verified};

    fn handler() -> (RegisterUserHandler, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = RegisterUserHandler::new(repo.clone(), Arc::new(PlainCredentialVerifier));
        (handler, repo)
    }

    fn command(email: &str, full_name: Option<&str>) -> RegisterUserCommand {
        RegisterUserCommand {
            email: email.to_string(),
            password: "pw1".to_string(),
            full_name: full_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn registers_customer_with_hashed_password() {
        let (handler, _) = handler();

        let user = handler.handle(command("a@x.com", Some("Alice"))).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.full_name, "Alice");
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.verified, Verified::No);
        assert_eq!(user.password.as_deref(), Some("plain:pw1"));
        assert!(user.google_id.is_none());
    }

    #[tokio::test]
    async fn missing_full_name_is_validation_error() {
        let (handler, repo) = handler();

        let result = handler.handle(command("a@x.com", None)).await;
        assert!(matches!(
            result,
            Err(AccountError::Validation { ref field, .. }) if field == "fullName"
        ));

        let blank = handler.handle(command("a@x.com", Some("   "))).await;
        assert!(matches!(blank, Err(AccountError::Validation { .. })));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_and_keeps_one_record() {
        let (handler, repo) = handler();
        handler.handle(command("a@x.com", Some("Alice"))).await.unwrap();

        let second = handler.handle(command("a@x.com", Some("Imposter"))).await;

        assert_eq!(
            second,
            Err(AccountError::Conflict("Email already in use.".to_string()))
        );
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn empty_password_is_rejected() {
        let (handler, _) = handler();
        let mut cmd = command("a@x.com", Some("Alice"));
        cmd.password.clear();

        assert!(matches!(
            handler.handle(cmd).await,
            Err(AccountError::Validation { ref field, .. }) if field == "password"
        ));
    }

    #[tokio::test]
    async fn empty_email_names_the_email_field() {
        let (handler, repo) = handler();

        let result = handler.handle(command("  ", Some("Alice"))).await;

        assert!(matches!(
            result,
            Err(AccountError::Validation { ref field, .. }) if field == "email"
        ));
        assert_eq!(repo.len().await, 0);
    }
}
