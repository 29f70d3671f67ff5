//! LoginUserHandler - Command handler for password login.

use std::sync::Arc;

use super::verify_password;
use crate::domain::account::{AccountError, User};
use crate::ports::{CredentialVerifier, UserRepository};

/// Uniform rejection for unknown email and wrong password alike.
pub const INVALID_CREDENTIALS: &str = "Incorrect email or password.";

#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginUserHandler {
    repository: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialVerifier>,
}

impl LoginUserHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            repository,
            credentials,
        }
    }

    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<User, AccountError> {
        let user = match self.repository.find_by_email(&cmd.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("login rejected: unknown email");
                return Err(AccountError::unauthorized(INVALID_CREDENTIALS));
            }
        };

        // Federation-only accounts have no password to match.
        let Some(hashed) = user.password.as_deref() else {
            tracing::debug!(user_id = %user.id, "login rejected: account has no password");
            return Err(AccountError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&self.credentials, &cmd.password, hashed).await? {
            tracing::debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AccountError::unauthorized(INVALID_CREDENTIALS));
        }

        tracing::info!(user_id = %user.id, "user logged in");
        Ok(user)
    }
}
