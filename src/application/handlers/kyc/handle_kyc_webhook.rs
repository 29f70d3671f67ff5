//! HandleKycWebhookHandler - Command handler for KYC provider webhooks.

use std::sync::Arc;

use crate::application::handlers::account::AccountStateMachine;
use crate::domain::account::{AccountError, Verified};
use crate::domain::foundation::{UserId, WebhookError};
use crate::domain::kyc::{KycEvent, KycWebhookPayload, PayloadDigestVerifier};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct HandleKycWebhookCommand {
    pub payload: Vec<u8>,
    /// `X-Payload-Digest` header, if sent.
    pub digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleKycWebhookResult {
    Updated { user_id: UserId, verified: Verified },
    Ignored(String),
}

/// Applies KYC review outcomes to the account named by `externalUserId`.
///
/// Unlike payment webhooks, an event for an unknown applicant is an error:
/// handling aborts with `UserNotFound` and nothing is retried.
pub struct HandleKycWebhookHandler {
    repository: Arc<dyn UserRepository>,
    state_machine: Arc<AccountStateMachine>,
    verifier: Option<PayloadDigestVerifier>,
}

impl HandleKycWebhookHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        state_machine: Arc<AccountStateMachine>,
    ) -> Self {
        Self {
            repository,
            state_machine,
            verifier: None,
        }
    }

    /// Enforce `X-Payload-Digest` on every delivery.
    pub fn with_verifier(mut self, verifier: PayloadDigestVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub async fn handle(
        &self,
        cmd: HandleKycWebhookCommand,
    ) -> Result<HandleKycWebhookResult, WebhookError> {
        if let Some(verifier) = &self.verifier {
            let digest = cmd.digest.as_deref().ok_or(WebhookError::MissingSignature)?;
            verifier.verify(&cmd.payload, digest)?;
        }

        let payload: KycWebhookPayload = serde_json::from_slice(&cmd.payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        let event = KycEvent::from_payload(&payload)?;

        let (Some(email), Some(transition)) = (event.email(), event.transition()) else {
            tracing::debug!(event_type = event.kind(), "kyc event ignored");
            return Ok(HandleKycWebhookResult::Ignored(event.kind().to_string()));
        };

        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| WebhookError::Database(e.to_string()))?
            .ok_or_else(|| WebhookError::UserNotFound(email.to_string()))?;

        let updated = self
            .state_machine
            .apply(&user.id, transition)
            .await
            .map_err(|e| match e {
                AccountError::NotFound(_) => WebhookError::UserNotFound(email.to_string()),
                other => WebhookError::Database(other.to_string()),
            })?;

        Ok(HandleKycWebhookResult::Updated {
            user_id: updated.id,
            verified: updated.verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::domain::account::NewUser;
    use serde_json::json;

    async fn setup() -> (HandleKycWebhookHandler, Arc<InMemoryUserRepository>, UserId) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo
            .create(NewUser::with_password("a@x.com", "Alice", "h"))
            .await
            .unwrap();
        let machine = Arc::new(AccountStateMachine::new(repo.clone()));
        (
            HandleKycWebhookHandler::new(repo.clone(), machine),
            repo,
            user.id,
        )
    }

    fn command(body: serde_json::Value) -> HandleKycWebhookCommand {
        HandleKycWebhookCommand {
            payload: serde_json::to_vec(&body).unwrap(),
            digest: None,
        }
    }

    async fn verified(repo: &InMemoryUserRepository, id: &UserId) -> Verified {
        repo.find_by_id(id).await.unwrap().unwrap().verified
    }

    #[tokio::test]
    async fn review_lifecycle_updates_verification() {
        let (handler, repo, id) = setup().await;

        handler
            .handle(command(json!({"type": "applicantPending", "externalUserId": "a@x.com_abc"})))
            .await
            .unwrap();
        assert_eq!(verified(&repo, &id).await, Verified::Pending);

        let result = handler
            .handle(command(json!({
                "type": "applicantReviewed",
                "externalUserId": "a@x.com_abc",
                "reviewResult": {"reviewAnswer": "GREEN"}
            })))
            .await
            .unwrap();
        assert_eq!(
            result,
            HandleKycWebhookResult::Updated {
                user_id: id.clone(),
                verified: Verified::Yes
            }
        );

        handler
            .handle(command(json!({"type": "applicantReset", "externalUserId": "a@x.com_abc"})))
            .await
            .unwrap();
        assert_eq!(verified(&repo, &id).await, Verified::No);
    }

    #[tokio::test]
    async fn final_rejection_and_retry_rejection() {
        let (handler, repo, id) = setup().await;

        handler
            .handle(command(json!({
                "type": "applicantReviewed",
                "externalUserId": "a@x.com_abc",
                "reviewResult": {"reviewAnswer": "RED", "reviewRejectType": "RETRY"}
            })))
            .await
            .unwrap();
        assert_eq!(verified(&repo, &id).await, Verified::Hold);

        handler
            .handle(command(json!({
                "type": "applicantReviewed",
                "externalUserId": "a@x.com_abc",
                "reviewResult": {"reviewAnswer": "RED", "reviewRejectType": "FINAL"}
            })))
            .await
            .unwrap();
        assert_eq!(verified(&repo, &id).await, Verified::Rejected);
    }

    #[tokio::test]
    async fn unknown_applicant_is_user_not_found() {
        let (handler, _, _) = setup().await;

        let result = handler
            .handle(command(json!({"type": "applicantOnHold", "externalUserId": "ghost@x.com_1"})))
            .await;

        assert!(matches!(result, Err(WebhookError::UserNotFound(ref e)) if e == "ghost@x.com"));
    }

    #[tokio::test]
    async fn unknown_type_is_ignored() {
        let (handler, repo, id) = setup().await;

        let result = handler
            .handle(command(json!({"type": "applicantCreated", "externalUserId": "a@x.com_1"})))
            .await
            .unwrap();

        assert_eq!(
            result,
            HandleKycWebhookResult::Ignored("applicantCreated".to_string())
        );
        assert_eq!(verified(&repo, &id).await, Verified::No);
    }

    #[tokio::test]
    async fn replay_is_idempotent() {
        let (handler, repo, id) = setup().await;
        let cmd = command(json!({"type": "applicantOnHold", "externalUserId": "a@x.com_1"}));

        handler.handle(cmd.clone()).await.unwrap();
        handler.handle(cmd).await.unwrap();

        assert_eq!(verified(&repo, &id).await, Verified::Hold);
    }

    #[tokio::test]
    async fn digest_is_enforced_when_configured() {
        let (handler, repo, id) = setup().await;
        let handler = handler.with_verifier(PayloadDigestVerifier::new("kyc-secret"));
        let mut cmd = command(json!({"type": "applicantPending", "externalUserId": "a@x.com_1"}));

        assert!(matches!(
            handler.handle(cmd.clone()).await,
            Err(WebhookError::MissingSignature)
        ));

        cmd.digest = Some(PayloadDigestVerifier::new("kyc-secret").sign_hex(&cmd.payload));
        handler.handle(cmd).await.unwrap();
        assert_eq!(verified(&repo, &id).await, Verified::Pending);
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (handler, _, _) = setup().await;
        let result = handler
            .handle(HandleKycWebhookCommand {
                payload: b"{".to_vec(),
                digest: None,
            })
            .await;
        assert!(matches!(result, Err(WebhookError::ParseError(_))));
    }
}
