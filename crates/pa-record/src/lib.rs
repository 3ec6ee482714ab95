//! pa-record: immutable, tamper-evident audit records.
//!
//! A record's payload is serialized to a canonical JSON form and digested
//! with SHA-256. When the assembler holds a signing key the record also
//! carries an HMAC-SHA256 signature over the digest and generation time.

pub mod assemble;
pub mod hash;
pub mod signing;
pub mod types;

pub use assemble::{Assembler, verify};
pub use hash::{canonical_bytes, digest_hex};
pub use signing::SigningKey;
pub use types::*;

pub type RecordResult<T> = Result<T, RecordError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Digest mismatch: record says {recorded}, content hashes to {computed}")]
    DigestMismatch { recorded: String, computed: String },

    #[error("Signature does not match record content")]
    SignatureMismatch,

    #[error("Record carries no signature")]
    MissingSignature,

    #[error("Invalid signing key: {message}")]
    InvalidKey { message: String },

    #[error("Malformed signature: {0}")]
    SignatureEncoding(#[from] base64::DecodeError),
}
