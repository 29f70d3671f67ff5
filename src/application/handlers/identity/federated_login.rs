//! FederatedLoginHandler - resolves a third-party profile to a local account.

use std::sync::Arc;

use crate::domain::account::{AccountError, NewUser, User};
use crate::domain::foundation::ErrorCode;
use crate::ports::{FederatedProfile, UserRepository};

const MISSING_EMAIL: &str = "Google email was not found. Make sure that the address is correct.";

#[derive(Debug, Clone)]
pub struct FederatedLoginCommand {
    pub profile: FederatedProfile,
}

#[derive(Debug, Clone)]
pub struct FederatedLoginResult {
    pub user: User,
    /// True when this login created the account.
    pub created: bool,
}

pub struct FederatedLoginHandler {
    repository: Arc<dyn UserRepository>,
}

impl FederatedLoginHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Returns the account registered under the profile's email, creating a
    /// federation-only one on first login. An existing account is returned
    /// untouched, password and all.
    pub async fn handle(
        &self,
        cmd: FederatedLoginCommand,
    ) -> Result<FederatedLoginResult, AccountError> {
        let FederatedProfile {
            provider_id,
            email,
            display_name,
        } = cmd.profile;

        // Matched as stored, the same way password login matches it.
        let email = email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AccountError::validation("email", MISSING_EMAIL))?;

        if let Some(user) = self.repository.find_by_email(&email).await? {
            return Ok(FederatedLoginResult {
                user,
                created: false,
            });
        }

        let full_name = display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        match self
            .repository
            .create(NewUser::federated(email.clone(), full_name, provider_id))
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "federated account created");
                Ok(FederatedLoginResult {
                    user,
                    created: true,
                })
            }
            // Lost a race with a concurrent first login for the same email.
            Err(err) if err.code == ErrorCode::UserExists => {
                let user = self
                    .repository
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| AccountError::infrastructure("user vanished after conflict"))?;
                Ok(FederatedLoginResult {
                    user,
                    created: false,
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;

    fn profile(email: Option<&str>, name: Option<&str>) -> FederatedLoginCommand {
        FederatedLoginCommand {
            profile: FederatedProfile {
                provider_id: "google-123".to_string(),
                email: email.map(str::to_string),
                display_name: name.map(str::to_string),
            },
        }
    }

    #[tokio::test]
    async fn first_login_creates_federated_account() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = FederatedLoginHandler::new(repo.clone());

        let result = handler
            .handle(profile(Some("g@x.com"), Some("Gina")))
            .await
            .unwrap();

        assert!(result.created);
        assert_eq!(result.user.google_id.as_deref(), Some("google-123"));
        assert_eq!(result.user.full_name, "Gina");
        assert!(result.user.password.is_none());
    }

    #[tokio::test]
    async fn existing_password_account_is_returned_unchanged() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let existing = repo
            .create(NewUser::with_password("a@x.com", "Alice", "hash"))
            .await
            .unwrap();
        let handler = FederatedLoginHandler::new(repo.clone());

        let result = handler
            .handle(profile(Some("a@x.com"), Some("Someone Else")))
            .await
            .unwrap();

        assert!(!result.created);
        assert_eq!(result.user, existing);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn repeat_login_does_not_duplicate() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = FederatedLoginHandler::new(repo.clone());

        let first = handler.handle(profile(Some("g@x.com"), Some("Gina"))).await.unwrap();
        let second = handler.handle(profile(Some("g@x.com"), Some("Gina"))).await.unwrap();

        assert_eq!(first.user.id, second.user.id);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn missing_email_is_rejected_without_creating() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = FederatedLoginHandler::new(repo.clone());

        let result = handler.handle(profile(None, Some("Nobody"))).await;

        assert!(matches!(result, Err(AccountError::Validation { .. })));
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn email_is_matched_exactly_as_stored() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let existing = repo
            .create(NewUser::with_password("Mia@x.com", "Mia", "hash"))
            .await
            .unwrap();
        let handler = FederatedLoginHandler::new(repo.clone());

        let same = handler.handle(profile(Some("Mia@x.com"), None)).await.unwrap();
        assert_eq!(same.user.id, existing.id);

        let padded = handler.handle(profile(Some(" Mia@x.com "), None)).await.unwrap();
        assert!(padded.created);
        assert_eq!(padded.user.email, " Mia@x.com ");

        let blank = handler.handle(profile(Some("   "), None)).await;
        assert!(matches!(blank, Err(AccountError::Validation { .. })));
    }

    #[tokio::test]
    async fn missing_display_name_falls_back_to_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = FederatedLoginHandler::new(repo);

        let result = handler.handle(profile(Some("g@x.com"), None)).await.unwrap();
        assert_eq!(result.user.full_name, "g@x.com");
    }
}
