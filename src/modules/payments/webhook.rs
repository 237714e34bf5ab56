//! Processor webhook verification.
//!
//! The signature header looks like `t=1700000000,v1=<hex>[,v1=<hex>...]`,
//! where each `v1` is an HMAC-SHA256 of `"{t}.{raw body}"` keyed with the
//! endpoint secret.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use super::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted age of a signed webhook
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, PaymentError> {
        serde_json::from_slice(payload).map_err(|e| PaymentError::InvalidPayload(e.to_string()))
    }

    /// Id of the checkout session for `checkout.session.completed` events
    pub fn completed_session_id(&self) -> Option<&str> {
        if self.event_type != CHECKOUT_SESSION_COMPLETED {
            return None;
        }
        self.data.object.get("id").and_then(|v| v.as_str())
    }
}

pub fn verify_signature(
    payload: &[u8],
    signature_header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), PaymentError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();

    for part in signature_header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| PaymentError::InvalidSignature("missing timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "missing v1 signature".to_string(),
        ));
    }
    if now.abs_diff(timestamp) > tolerance_secs.unsigned_abs() {
        return Err(PaymentError::InvalidSignature(
            "timestamp outside tolerance".to_string(),
        ));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::InvalidSignature(e.to_string()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);

    let matches = signatures
        .iter()
        .any(|candidate| mac.clone().verify_slice(candidate).is_ok());

    if matches {
        Ok(())
    } else {
        Err(PaymentError::InvalidSignature(
            "no matching signature".to_string(),
        ))
    }
}

/// Builds a signature header for `payload`; used by tests to simulate the processor
#[cfg(test)]
pub fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = br#"{"id":"evt_1"}"#;
    const KNOWN_SIGNATURE: &str =
        "c89214b5b5da833daed6f0b8c5bb6bd58cea9022bd80ccc78230f3942d632925";

    #[test]
    fn test_known_signature_verifies() {
        let header = format!("t=1700000000,v1={}", KNOWN_SIGNATURE);
        assert!(verify_signature(PAYLOAD, &header, "whsec_test", 1700000100, 300).is_ok());
    }

    #[test]
    fn test_any_of_multiple_signatures_may_match() {
        let header = format!("t=1700000000,v1=deadbeef,v1={}", KNOWN_SIGNATURE);
        assert!(verify_signature(PAYLOAD, &header, "whsec_test", 1700000000, 300).is_ok());
    }

    #[test]
    fn test_rejects_stale_timestamp() {
        let header = format!("t=1700000000,v1={}", KNOWN_SIGNATURE);
        let result = verify_signature(PAYLOAD, &header, "whsec_test", 1700000301, 300);
        assert!(matches!(result, Err(PaymentError::InvalidSignature(_))));
    }

    #[test]
    fn test_rejects_extreme_timestamps() {
        for t in [i64::MIN, i64::MAX] {
            let header = format!("t={},v1={}", t, KNOWN_SIGNATURE);
            let result = verify_signature(PAYLOAD, &header, "whsec_test", 1700000000, 300);
            assert!(matches!(result, Err(PaymentError::InvalidSignature(_))));
        }
    }

    #[test]
    fn test_rejects_tampered_body_and_wrong_secret() {
        let header = format!("t=1700000000,v1={}", KNOWN_SIGNATURE);
        assert!(verify_signature(br#"{"id":"evt_2"}"#, &header, "whsec_test", 1700000000, 300).is_err());
        assert!(verify_signature(PAYLOAD, &header, "whsec_other", 1700000000, 300).is_err());
        assert!(verify_signature(PAYLOAD, "garbage", "whsec_test", 1700000000, 300).is_err());
    }

    #[test]
    fn test_completed_session_id() {
        let event = WebhookEvent::parse(
            br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_123"}}}"#,
        )
        .unwrap();
        assert_eq!(event.completed_session_id(), Some("cs_123"));

        let other = WebhookEvent::parse(
            br#"{"type":"payment_intent.created","data":{"object":{"id":"pi_1"}}}"#,
        )
        .unwrap();
        assert_eq!(other.completed_session_id(), None);
    }
}
