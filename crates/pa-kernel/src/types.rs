//! Input records and fault flags.

use crate::error::{KernelError, KernelResult};
use chrono::{DateTime, Utc};
use pa_core::numeric::{ensure_finite, mean3};
use pa_curves::{CurveClass, EfficiencyClass, PoleCount};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Motor nameplate data, supplied once per audit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameplateSpec {
    /// Rated shaft output (kW)
    pub rated_power_kw: f64,
    /// Rated line voltage (V); the nominal for voltage deviation
    pub rated_voltage_v: f64,
    /// Rated full-load current (A)
    pub rated_current_a: f64,
    pub poles: PoleCount,
    /// Rated full-load speed (rpm)
    pub rated_speed_rpm: f64,
    /// Reference IEC efficiency class
    pub efficiency_class: EfficiencyClass,
}

impl NameplateSpec {
    pub fn curve_class(&self) -> CurveClass {
        CurveClass::for_motor(self.efficiency_class, self.poles, self.rated_power_kw)
    }

    /// Check that every rating is finite and positive.
    pub fn validate(&self) -> KernelResult<()> {
        for (value, what) in [
            (self.rated_power_kw, "rated power"),
            (self.rated_voltage_v, "rated voltage"),
            (self.rated_current_a, "rated current"),
            (self.rated_speed_rpm, "rated speed"),
        ] {
            ensure_finite(value, what)?;
            if value <= 0.0 {
                return Err(KernelError::InvalidInput { what });
            }
        }
        Ok(())
    }
}

/// One measurement event at the pump.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldReading {
    /// Phase currents L1..L3 (A)
    pub currents_a: [f64; 3],
    /// Line voltages L1-L2, L2-L3, L3-L1 (V)
    pub voltages_v: [f64; 3],
    /// Pump discharge gauge pressure (bar)
    pub discharge_pressure_bar: f64,
    /// Measured flow (m³/h)
    pub flow_rate_m3_h: f64,
    /// Pump suction gauge pressure (bar), when a suction gauge is fitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suction_pressure_bar: Option<f64>,
    /// Measured power factor; the configured default is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl FieldReading {
    /// Quick estimate from a single clamp-meter reading: the same current and
    /// voltage on all three phases. The imbalance check is then trivially 0.
    pub fn single_phase(
        current_a: f64,
        voltage_v: f64,
        discharge_pressure_bar: f64,
        flow_rate_m3_h: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            currents_a: [current_a; 3],
            voltages_v: [voltage_v; 3],
            discharge_pressure_bar,
            flow_rate_m3_h,
            suction_pressure_bar: None,
            power_factor: None,
            timestamp,
        }
    }

    pub fn mean_current_a(&self) -> f64 {
        mean3(&self.currents_a)
    }

    pub fn mean_voltage_v(&self) -> f64 {
        mean3(&self.voltages_v)
    }

    /// Pressure rise across the pump (bar).
    pub fn differential_pressure_bar(&self) -> f64 {
        self.discharge_pressure_bar - self.suction_pressure_bar.unwrap_or(0.0)
    }
}

/// Closed set of conditions flagged on a diagnosis or result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaultKind {
    /// Phase imbalance above the NEMA derating threshold
    HighImbalance,
    /// Phase imbalance at which NEMA advises against operation
    CriticalImbalance,
    UnderVoltage,
    OverVoltage,
    /// Motor loaded above its rating; a flag, not an error
    OverloadCondition,
}

impl FaultKind {
    pub fn label(self) -> &'static str {
        match self {
            FaultKind::HighImbalance => "high phase imbalance",
            FaultKind::CriticalImbalance => "critical phase imbalance",
            FaultKind::UnderVoltage => "under-voltage",
            FaultKind::OverVoltage => "over-voltage",
            FaultKind::OverloadCondition => "motor overload",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
