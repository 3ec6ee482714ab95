//! Keyed signatures over record digests.

use crate::{RecordError, RecordResult};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Shortest key accepted for signing (bytes).
pub const MIN_KEY_LEN: usize = 16;

/// Process-held secret for HMAC-SHA256 record signatures.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> RecordResult<Self> {
        let bytes = bytes.into();
        if bytes.len() < MIN_KEY_LEN {
            return Err(RecordError::InvalidKey {
                message: format!("key must be at least {MIN_KEY_LEN} bytes, got {}", bytes.len()),
            });
        }
        Ok(Self(bytes))
    }

    /// Key from text such as a key file or environment variable; surrounding
    /// whitespace is ignored.
    pub fn from_text(text: &str) -> RecordResult<Self> {
        Self::new(text.trim().as_bytes().to_vec())
    }

    fn mac(&self, digest: &str, generated_at: &DateTime<Utc>) -> RecordResult<HmacSha256> {
        let mut mac = HmacSha256::new_from_slice(&self.0).map_err(|e| RecordError::InvalidKey {
            message: e.to_string(),
        })?;
        mac.update(digest.as_bytes());
        mac.update(b"\n");
        mac.update(generated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true).as_bytes());
        Ok(mac)
    }

    /// Base64 HMAC-SHA256 over `digest` and `generated_at`.
    pub fn sign(&self, digest: &str, generated_at: &DateTime<Utc>) -> RecordResult<String> {
        let tag = self.mac(digest, generated_at)?.finalize().into_bytes();
        Ok(BASE64.encode(tag))
    }

    /// Constant-time check of a base64 signature.
    pub fn verify(&self, digest: &str, generated_at: &DateTime<Utc>, signature: &str) -> RecordResult<()> {
        let raw = BASE64.decode(signature)?;
        self.mac(digest, generated_at)?
            .verify_slice(&raw)
            .map_err(|_| RecordError::SignatureMismatch)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bytes>)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn short_keys_are_rejected() {
        assert!(SigningKey::new(b"short".to_vec()).is_err());
        assert!(SigningKey::from_text("  0123456789abcdef  \n").is_ok());
    }

    #[test]
    fn sign_then_verify() {
        let key = SigningKey::from_text("station-audit-secret-01").unwrap();
        let sig = key.sign("abc123", &at()).unwrap();
        key.verify("abc123", &at(), &sig).unwrap();
    }

    #[test]
    fn wrong_key_or_time_fails() {
        let key = SigningKey::from_text("station-audit-secret-01").unwrap();
        let other = SigningKey::from_text("station-audit-secret-02").unwrap();
        let sig = key.sign("abc123", &at()).unwrap();

        assert!(matches!(other.verify("abc123", &at(), &sig), Err(RecordError::SignatureMismatch)));
        let later = at() + chrono::Duration::seconds(1);
        assert!(matches!(key.verify("abc123", &later, &sig), Err(RecordError::SignatureMismatch)));
        assert!(matches!(key.verify("abc123", &at(), "not base64!"), Err(RecordError::SignatureEncoding(_))));
    }

    #[test]
    fn debug_hides_key_material() {
        let key = SigningKey::from_text("station-audit-secret-01").unwrap();
        assert!(!format!("{key:?}").contains("secret"));
    }
}
