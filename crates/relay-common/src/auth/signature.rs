//! Chat platform request signature verification
//!
//! Requests are signed with HMAC-SHA256 over `v0:{timestamp}:{raw body}` using
//! the app's signing secret. The signature header carries `v0=<hex>`.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Header carrying the signing timestamp (Unix seconds)
pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";

/// Signature scheme version prefix
pub const SIGNATURE_VERSION: &str = "v0";

/// Decides whether an inbound webhook request is authentic
///
/// The pipeline treats implementations as a black box.
pub trait RequestVerifier: Send + Sync {
    fn is_valid_request(
        &self,
        body: &[u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> bool;
}

/// v0 signature verifier with a replay window
#[derive(Clone)]
pub struct SlackSignatureVerifier {
    secret: Vec<u8>,
    max_age_secs: i64,
}

impl SlackSignatureVerifier {
    /// Create a new verifier for the given signing secret
    pub fn new(secret: impl AsRef<[u8]>, max_age_secs: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            max_age_secs,
        }
    }

    /// Compute the `v0=<hex>` signature for a timestamp and body
    pub fn sign(&self, timestamp: &str, body: &[u8]) -> Option<String> {
        let mac = self.mac(timestamp, body)?;
        Some(format!(
            "{SIGNATURE_VERSION}={}",
            hex::encode(mac.finalize().into_bytes())
        ))
    }

    fn mac(&self, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).ok()?;
        mac.update(SIGNATURE_VERSION.as_bytes());
        mac.update(b":");
        mac.update(timestamp.as_bytes());
        mac.update(b":");
        mac.update(body);
        Some(mac)
    }

    fn verify_at(&self, body: &[u8], timestamp: &str, signature: &str, now: i64) -> bool {
        let Ok(sent_at) = timestamp.trim().parse::<i64>() else {
            return false;
        };
        if (now - sent_at).abs() > self.max_age_secs {
            return false;
        }

        let Some(expected) = signature
            .strip_prefix(SIGNATURE_VERSION)
            .and_then(|rest| rest.strip_prefix('='))
            .and_then(|hex_sig| hex::decode(hex_sig).ok())
        else {
            return false;
        };

        match self.mac(timestamp.trim(), body) {
            // Constant-time comparison via the HMAC library
            Some(mac) => mac.verify_slice(&expected).is_ok(),
            None => false,
        }
    }
}

impl RequestVerifier for SlackSignatureVerifier {
    fn is_valid_request(
        &self,
        body: &[u8],
        timestamp: Option<&str>,
        signature: Option<&str>,
    ) -> bool {
        match (timestamp, signature) {
            (Some(timestamp), Some(signature)) => {
                self.verify_at(body, timestamp, signature, Utc::now().timestamp())
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for SlackSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackSignatureVerifier")
            .field("secret", &"<redacted>")
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}
