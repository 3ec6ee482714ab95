//! Canonical form and content digest.

use crate::RecordResult;
use crate::types::AuditPayload;
use sha2::{Digest, Sha256};

/// Compact JSON of the payload.
///
/// Field order follows declaration order and fault sets are ordered, so equal
/// payloads always give equal bytes.
pub fn canonical_bytes(payload: &AuditPayload) -> RecordResult<Vec<u8>> {
    Ok(serde_json::to_vec(payload)?)
}

/// Lower-case hex SHA-256 of `bytes`.
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
