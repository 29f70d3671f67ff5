//! Stripe-Signature verification.
//!
//! The signed payload is `"{timestamp}.{raw body}"`, authenticated with
//! HMAC-SHA256 under the endpoint secret. Deliveries older than five minutes,
//! or more than a minute in the future, are rejected to limit replay.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::stripe_event::StripeEvent;
use crate::domain::foundation::WebhookError;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed `t=<timestamp>,v1=<hex>[,v1=<hex>...]` header.
///
/// Stripe sends several `v1` entries while a secret is being rolled; any one
/// of them matching is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp = None;
        let mut v1_signatures = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    let signature = hex::decode(value).map_err(|_| {
                        WebhookError::ParseError("invalid v1 signature hex".to_string())
                    })?;
                    v1_signatures.push(signature);
                }
                // v0 and unknown schemes are ignored
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;
        if v1_signatures.is_empty() {
            return Err(WebhookError::ParseError("missing v1 signature".to_string()));
        }

        Ok(Self {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifies deliveries against the endpoint's signing secret.
#[derive(Clone)]
pub struct StripeWebhookVerifier {
    secret: String,
}

impl StripeWebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature against the current clock, then parses the event.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, WebhookError> {
        self.verify_at(payload, signature_header, chrono::Utc::now().timestamp())?;
        serde_json::from_slice(payload).map_err(|e| WebhookError::ParseError(e.to_string()))
    }

    /// Verifies the signature as of `now` (Unix seconds).
    pub fn verify_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<(), WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        let age = now
            .checked_sub(header.timestamp)
            .ok_or(WebhookError::InvalidTimestamp)?;
        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        let expected = self.sign(header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| candidate.len() == expected.len() && bool::from(candidate.ct_eq(&expected)));

        if matched {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    fn sign(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Builds a `Stripe-Signature` header value for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret_12345";
    const PAYLOAD: &str = r#"{"id":"evt_1","type":"charge.refunded","data":{"object":{"customer":"cus_1","amount":1000}}}"#;
    const NOW: i64 = 1_705_314_600;

    #[test]
    fn parse_header_collects_every_v1() {
        let header = format!("t=123,v1={},v1={},v0={}", "a".repeat(64), "b".repeat(64), "c".repeat(64));
        let parsed = SignatureHeader::parse(&header).unwrap();

        assert_eq!(parsed.timestamp, 123);
        assert_eq!(parsed.v1_signatures.len(), 2);
    }

    #[test]
    fn parse_header_requires_timestamp_and_v1() {
        assert!(matches!(
            SignatureHeader::parse(&format!("v1={}", "a".repeat(64))),
            Err(WebhookError::ParseError(_))
        ));
        assert!(matches!(
            SignatureHeader::parse("t=123"),
            Err(WebhookError::ParseError(_))
        ));
    }

    #[test]
    fn parse_header_rejects_bad_hex_and_missing_equals() {
        assert!(SignatureHeader::parse("t=123,v1=zz").is_err());
        assert!(SignatureHeader::parse("t123").is_err());
    }

    #[test]
    fn accepts_valid_signature() {
        let verifier = StripeWebhookVerifier::new(SECRET);
        let header = compute_test_signature(SECRET, NOW, PAYLOAD);

        assert!(verifier.verify_at(PAYLOAD.as_bytes(), &header, NOW).is_ok());
    }

    #[test]
    fn accepts_any_matching_v1_during_secret_roll() {
        let verifier = StripeWebhookVerifier::new(SECRET);
        let valid = compute_test_signature(SECRET, NOW, PAYLOAD);
        let valid_sig = valid.split("v1=").nth(1).unwrap();
        let header = format!("t={},v1={},v1={}", NOW, "0".repeat(64), valid_sig);

        assert!(verifier.verify_at(PAYLOAD.as_bytes(), &header, NOW).is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = StripeWebhookVerifier::new("whsec_other");
        let header = compute_test_signature(SECRET, NOW, PAYLOAD);

        assert!(matches!(
            verifier.verify_at(PAYLOAD.as_bytes(), &header, NOW),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_tampered_payload() {
        let verifier = StripeWebhookVerifier::new(SECRET);
        let header = compute_test_signature(SECRET, NOW, PAYLOAD);
        let tampered = PAYLOAD.replace("1000", "9999");

        assert!(matches!(
            verifier.verify_at(tampered.as_bytes(), &header, NOW),
            Err(WebhookError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_stale_and_future_timestamps() {
        let verifier = StripeWebhookVerifier::new(SECRET);

        let stale = compute_test_signature(SECRET, NOW - 301, PAYLOAD);
        assert!(matches!(
            verifier.verify_at(PAYLOAD.as_bytes(), &stale, NOW),
            Err(WebhookError::TimestampOutOfRange)
        ));

        let future = compute_test_signature(SECRET, NOW + 61, PAYLOAD);
        assert!(matches!(
            verifier.verify_at(PAYLOAD.as_bytes(), &future, NOW),
            Err(WebhookError::InvalidTimestamp)
        ));

        let skewed = compute_test_signature(SECRET, NOW + 30, PAYLOAD);
        assert!(verifier.verify_at(PAYLOAD.as_bytes(), &skewed, NOW).is_ok());
    }

    #[test]
    fn extreme_timestamps_are_rejected_without_overflow() {
        let verifier = StripeWebhookVerifier::new(SECRET);

        let result = verifier.verify_at(b"{}", "t=-9223372036854775808,v1=00", 1_700_000_000);
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp)));

        let result = verifier.verify_at(b"{}", "t=9223372036854775807,v1=00", 1_700_000_000);
        assert!(matches!(result, Err(WebhookError::InvalidTimestamp)));
    }

    #[test]
    fn verify_and_parse_returns_event() {
        let verifier = StripeWebhookVerifier::new(SECRET);
        let header = compute_test_signature(SECRET, chrono::Utc::now().timestamp(), PAYLOAD);

        let event = verifier.verify_and_parse(PAYLOAD.as_bytes(), &header).unwrap();
        assert_eq!(event.event_type, "charge.refunded");
    }
}
