//! Identity handlers - turn a login attempt into a resolved user.
//!
//! Together these form the identity resolver: explicit registration,
//! password login and first-or-repeat federated login.

mod federated_login;
mod login_user;
mod register_user;

pub use federated_login::{FederatedLoginCommand, FederatedLoginHandler, FederatedLoginResult};
pub use login_user::{LoginUserCommand, LoginUserHandler, INVALID_CREDENTIALS};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::ports::CredentialVerifier;

/// Runs the (deliberately slow) hash off the async executor.
async fn hash_password(
    credentials: &Arc<dyn CredentialVerifier>,
    password: &str,
) -> Result<String, AccountError> {
    let credentials = Arc::clone(credentials);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || credentials.hash(&password))
        .await
        .map_err(|e| AccountError::infrastructure(format!("hashing task failed: {}", e)))?
        .map_err(AccountError::from)
}

/// Runs password verification off the async executor.
async fn verify_password(
    credentials: &Arc<dyn CredentialVerifier>,
    password: &str,
    hashed: &str,
) -> Result<bool, AccountError> {
    let credentials = Arc::clone(credentials);
    let password = password.to_string();
    let hashed = hashed.to_string();
    tokio::task::spawn_blocking(move || credentials.verify(&password, &hashed))
        .await
        .map_err(|e| AccountError::infrastructure(format!("verification task failed: {}", e)))
}
