//! Audit project schema.
//!
//! One project describes one pump set: its nameplate, the local tariff,
//! optional kernel settings and the field readings taken on site.

use chrono::{DateTime, Utc};
use pa_kernel::{CurrencyCode, FieldReading, KernelConfig, NameplateSpec, TariffContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditProject {
    pub version: u32,
    pub site: SiteDef,
    pub nameplate: NameplateSpec,
    pub tariff: TariffContext,
    #[serde(default)]
    pub settings: KernelConfig,
    #[serde(default)]
    pub readings: Vec<ReadingDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rates: Option<ExchangeRatesDef>,
}

impl AuditProject {
    pub fn reading(&self, id: &str) -> Option<&ReadingDef> {
        self.readings.iter().find(|r| r.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteDef {
    pub station_id: String,
    pub auditor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingDef {
    pub id: String,
    pub electrical: ElectricalDef,
    pub discharge_pressure_bar: f64,
    pub flow_rate_m3_h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suction_pressure_bar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// How the electrical side was measured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElectricalDef {
    /// Per-phase currents and line voltages from a power analyser
    ThreePhase {
        currents_a: [f64; 3],
        voltages_v: [f64; 3],
    },
    /// One clamp-meter current and one voltage, assumed on every phase
    SinglePhase { current_a: f64, voltage_v: f64 },
}

impl ReadingDef {
    pub fn to_field_reading(&self) -> FieldReading {
        let mut reading = match self.electrical {
            ElectricalDef::ThreePhase {
                currents_a,
                voltages_v,
            } => FieldReading {
                currents_a,
                voltages_v,
                discharge_pressure_bar: self.discharge_pressure_bar,
                flow_rate_m3_h: self.flow_rate_m3_h,
                suction_pressure_bar: None,
                power_factor: None,
                timestamp: self.timestamp,
            },
            ElectricalDef::SinglePhase {
                current_a,
                voltage_v,
            } => FieldReading::single_phase(
                current_a,
                voltage_v,
                self.discharge_pressure_bar,
                self.flow_rate_m3_h,
                self.timestamp,
            ),
        };
        reading.suction_pressure_bar = self.suction_pressure_bar;
        reading.power_factor = self.power_factor;
        reading
    }
}

/// Rates for restating amounts in a reporting currency.
///
/// `rates[c]` is the number of `report_currency` units per unit of `c`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeRatesDef {
    pub report_currency: CurrencyCode,
    #[serde(default)]
    pub rates: BTreeMap<CurrencyCode, f64>,
}
