//! Assembling and verifying records.

use crate::hash::{canonical_bytes, digest_hex};
use crate::signing::SigningKey;
use crate::types::{AuditContext, AuditPayload, AuditRecord};
use crate::{RecordError, RecordResult};
use chrono::{DateTime, Utc};
use pa_kernel::{
    AuditOutcome, EfficiencyResult, ElectricalDiagnosis, FieldReading, FinancialImpact,
    NameplateSpec,
};

/// Version stamped into every payload.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seals kernel outputs into [`AuditRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    key: Option<SigningKey>,
    context: Option<AuditContext>,
}

impl Assembler {
    /// Digest-only assembler.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: SigningKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_context(mut self, context: AuditContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn signs(&self) -> bool {
        self.key.is_some()
    }

    /// Record of the five core stage outputs.
    pub fn assemble(
        &self,
        spec: &NameplateSpec,
        reading: &FieldReading,
        diagnosis: &ElectricalDiagnosis,
        efficiency: &EfficiencyResult,
        financial: &FinancialImpact,
    ) -> RecordResult<AuditRecord> {
        let payload = AuditPayload {
            engine_version: ENGINE_VERSION.to_string(),
            context: self.context.clone(),
            nameplate: spec.clone(),
            reading: reading.clone(),
            diagnosis: diagnosis.clone(),
            motor: None,
            hydraulic: None,
            efficiency: efficiency.clone(),
            financial: financial.clone(),
            operating_cost: None,
            assessment: None,
        };
        self.seal(payload, Utc::now())
    }

    /// Record of a full pipeline run, including motor and wet-end detail,
    /// operating cost and the operating assessment.
    pub fn assemble_outcome(
        &self,
        spec: &NameplateSpec,
        reading: &FieldReading,
        outcome: &AuditOutcome,
    ) -> RecordResult<AuditRecord> {
        let payload = AuditPayload {
            engine_version: ENGINE_VERSION.to_string(),
            context: self.context.clone(),
            nameplate: spec.clone(),
            reading: reading.clone(),
            diagnosis: outcome.diagnosis.clone(),
            motor: Some(outcome.motor.clone()),
            hydraulic: Some(outcome.hydraulic.clone()),
            efficiency: outcome.efficiency.clone(),
            financial: outcome.financial.clone(),
            operating_cost: Some(outcome.operating_cost.clone()),
            assessment: Some(outcome.assessment.clone()),
        };
        self.seal(payload, Utc::now())
    }

    /// Digest and, with a key, sign `payload` as generated at `generated_at`.
    pub fn seal(&self, payload: AuditPayload, generated_at: DateTime<Utc>) -> RecordResult<AuditRecord> {
        let digest = digest_hex(&canonical_bytes(&payload)?);
        let signature = match &self.key {
            Some(key) => Some(key.sign(&digest, &generated_at)?),
            None => None,
        };
        tracing::debug!(%digest, signed = signature.is_some(), "record sealed");
        Ok(AuditRecord::sealed(payload, generated_at, digest, signature))
    }
}

/// Check that `record` has not been altered since it was sealed.
///
/// The digest is always recomputed. With a key the signature must also be
/// present and valid.
pub fn verify(record: &AuditRecord, key: Option<&SigningKey>) -> RecordResult<()> {
    let computed = digest_hex(&canonical_bytes(record.payload())?);
    if computed != record.digest() {
        return Err(RecordError::DigestMismatch {
            recorded: record.digest().to_string(),
            computed,
        });
    }
    if let Some(key) = key {
        let signature = record.signature().ok_or(RecordError::MissingSignature)?;
        key.verify(record.digest(), &record.generated_at(), signature)?;
    }
    Ok(())
}
