//! Typed KYC webhook events.

use serde::Deserialize;

use super::applicant::email_from_external_user_id;
use crate::domain::account::{AccountTransition, Verified};
use crate::domain::foundation::WebhookError;

/// Wire shape of a KYC provider delivery. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycWebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub external_user_id: Option<String>,
    #[serde(default)]
    pub review_result: Option<ReviewResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    #[serde(default)]
    pub review_answer: Option<String>,
    #[serde(default)]
    pub review_reject_type: Option<String>,
}

/// Outcome of a completed review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAnswer {
    Green,
    /// Rejected; `final_rejection` is set for `reviewRejectType = FINAL`.
    Red { final_rejection: bool },
    Other(String),
}

impl From<&ReviewResult> for ReviewAnswer {
    fn from(result: &ReviewResult) -> Self {
        match result.review_answer.as_deref() {
            Some("GREEN") => ReviewAnswer::Green,
            Some("RED") => ReviewAnswer::Red {
                final_rejection: result.review_reject_type.as_deref() == Some("FINAL"),
            },
            other => ReviewAnswer::Other(other.unwrap_or_default().to_string()),
        }
    }
}

/// A KYC provider event, already bound to the applicant's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KycEvent {
    ApplicantPending { email: String },
    ApplicantReset { email: String },
    ApplicantOnHold { email: String },
    ApplicantReviewed { email: String, answer: ReviewAnswer },
    /// Any other event type. Acknowledged without effect.
    Unrecognized(String),
}

impl KycEvent {
    /// Classifies a delivery. Recognized events must carry an `externalUserId`.
    pub fn from_payload(payload: &KycWebhookPayload) -> Result<Self, WebhookError> {
        let email = || -> Result<String, WebhookError> {
            let external = payload
                .external_user_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .ok_or(WebhookError::MissingField("externalUserId"))?;
            Ok(email_from_external_user_id(external).to_string())
        };

        let event = match payload.event_type.as_str() {
            "applicantPending" => KycEvent::ApplicantPending { email: email()? },
            "applicantReset" => KycEvent::ApplicantReset { email: email()? },
            "applicantOnHold" => KycEvent::ApplicantOnHold { email: email()? },
            "applicantReviewed" => KycEvent::ApplicantReviewed {
                email: email()?,
                answer: payload
                    .review_result
                    .as_ref()
                    .map(ReviewAnswer::from)
                    .unwrap_or_else(|| ReviewAnswer::Other(String::new())),
            },
            other => KycEvent::Unrecognized(other.to_string()),
        };
        Ok(event)
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            KycEvent::ApplicantPending { email }
            | KycEvent::ApplicantReset { email }
            | KycEvent::ApplicantOnHold { email }
            | KycEvent::ApplicantReviewed { email, .. } => Some(email),
            KycEvent::Unrecognized(_) => None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            KycEvent::ApplicantPending { .. } => "applicantPending",
            KycEvent::ApplicantReset { .. } => "applicantReset",
            KycEvent::ApplicantOnHold { .. } => "applicantOnHold",
            KycEvent::ApplicantReviewed { .. } => "applicantReviewed",
            KycEvent::Unrecognized(kind) => kind,
        }
    }

    /// The account transition for this event, if any.
    pub fn transition(&self) -> Option<AccountTransition> {
        let state = match self {
            KycEvent::ApplicantPending { .. } => Verified::Pending,
            KycEvent::ApplicantReset { .. } => Verified::No,
            KycEvent::ApplicantOnHold { .. } => Verified::Hold,
            KycEvent::ApplicantReviewed { answer, .. } => match answer {
                ReviewAnswer::Green => Verified::Yes,
                ReviewAnswer::Red {
                    final_rejection: true,
                } => Verified::Rejected,
                // Retryable rejections and unknown answers need another review.
                _ => Verified::Hold,
            },
            KycEvent::Unrecognized(_) => return None,
        };
        Some(AccountTransition::KycStatusChanged(state))
    }
}
