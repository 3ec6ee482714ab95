//! Record data types.

use chrono::{DateTime, Utc};
use pa_kernel::{
    Assessment, EfficiencyResult, ElectricalDiagnosis, FieldReading, FinancialImpact,
    HydraulicPerformance, MotorPerformance, NameplateSpec, OperatingCost,
};
use serde::{Deserialize, Serialize};

/// Where and by whom a reading was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditContext {
    pub station_id: String,
    pub auditor: String,
}

/// Everything covered by the digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditPayload {
    /// Version of the engine that produced the figures
    pub engine_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AuditContext>,
    pub nameplate: NameplateSpec,
    pub reading: FieldReading,
    pub diagnosis: ElectricalDiagnosis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motor: Option<MotorPerformance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hydraulic: Option<HydraulicPerformance>,
    pub efficiency: EfficiencyResult,
    pub financial: FinancialImpact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_cost: Option<OperatingCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Assessment>,
}

/// A sealed audit record.
///
/// Fields are read-only; producing different figures means assembling a new
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditRecord {
    payload: AuditPayload,
    generated_at: DateTime<Utc>,
    digest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
}

impl AuditRecord {
    pub(crate) fn sealed(
        payload: AuditPayload,
        generated_at: DateTime<Utc>,
        digest: String,
        signature: Option<String>,
    ) -> Self {
        Self {
            payload,
            generated_at,
            digest,
            signature,
        }
    }

    pub fn payload(&self) -> &AuditPayload {
        &self.payload
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Lower-case hex SHA-256 of the canonical payload.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a record. The digest is not checked here; see [`crate::verify`].
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
