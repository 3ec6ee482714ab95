//! Electrical diagnostics: phase balance and supply voltage quality.

use crate::config::GridLimits;
use crate::error::{KernelError, KernelResult};
use crate::types::FaultKind;
use pa_core::numeric::{ensure_non_negative, max_deviation3, mean3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Grid-quality findings for one reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElectricalDiagnosis {
    pub mean_current_a: f64,
    pub mean_voltage_v: f64,
    /// NEMA current imbalance (%)
    pub current_imbalance_pct: f64,
    /// NEMA voltage imbalance (%)
    pub voltage_imbalance_pct: f64,
    /// The worse of current and voltage imbalance (%), always >= 0
    pub imbalance_pct: f64,
    /// Mean line voltage relative to nominal (%), signed
    pub voltage_deviation_pct: f64,
    pub power_factor: f64,
    pub faults: BTreeSet<FaultKind>,
}

impl ElectricalDiagnosis {
    pub fn has(&self, fault: FaultKind) -> bool {
        self.faults.contains(&fault)
    }
}

/// NEMA phase imbalance: largest deviation from the mean over the mean, in %.
///
/// Returns `None` when the mean is not positive.
pub fn phase_imbalance_pct(phases: &[f64; 3]) -> Option<f64> {
    let mean = mean3(phases);
    if mean > 0.0 {
        Some(max_deviation3(phases) * 100.0 / mean)
    } else {
        None
    }
}

/// Diagnose supply quality from per-phase currents and line voltages.
///
/// # Errors
/// - [`KernelError::NoLoadCondition`] when the mean current is at or below
///   `limits.min_load_current_a`
/// - [`KernelError::InvalidInput`] for negative phases, a non-positive
///   nominal or mean voltage, or a power factor outside (0, 1]
pub fn diagnose(
    phase_currents_a: &[f64; 3],
    phase_voltages_v: &[f64; 3],
    nominal_voltage_v: f64,
    power_factor: f64,
    limits: &GridLimits,
) -> KernelResult<ElectricalDiagnosis> {
    for &i in phase_currents_a {
        ensure_non_negative(i, "phase current")?;
    }
    for &v in phase_voltages_v {
        ensure_non_negative(v, "phase voltage")?;
    }
    if !(nominal_voltage_v.is_finite() && nominal_voltage_v > 0.0) {
        return Err(KernelError::InvalidInput {
            what: "nominal voltage must be positive",
        });
    }
    if !(power_factor.is_finite() && power_factor > 0.0 && power_factor <= 1.0) {
        return Err(KernelError::InvalidInput {
            what: "power factor must be in (0, 1]",
        });
    }

    let mean_current_a = mean3(phase_currents_a);
    if mean_current_a <= limits.min_load_current_a {
        return Err(KernelError::NoLoadCondition { mean_current_a });
    }

    let current_imbalance_pct =
        phase_imbalance_pct(phase_currents_a).ok_or(KernelError::NoLoadCondition { mean_current_a })?;
    let voltage_imbalance_pct =
        phase_imbalance_pct(phase_voltages_v).ok_or(KernelError::InvalidInput {
            what: "line voltage must be positive",
        })?;
    let imbalance_pct = current_imbalance_pct.max(voltage_imbalance_pct);

    let mean_voltage_v = mean3(phase_voltages_v);
    let voltage_deviation_pct = (mean_voltage_v - nominal_voltage_v) / nominal_voltage_v * 100.0;

    let mut faults = BTreeSet::new();
    if imbalance_pct > limits.imbalance_warning_pct {
        faults.insert(FaultKind::HighImbalance);
    }
    if imbalance_pct > limits.imbalance_critical_pct {
        faults.insert(FaultKind::CriticalImbalance);
    }
    if voltage_deviation_pct < limits.under_voltage_pct {
        faults.insert(FaultKind::UnderVoltage);
    }
    if voltage_deviation_pct > limits.over_voltage_pct {
        faults.insert(FaultKind::OverVoltage);
    }

    tracing::debug!(
        current_imbalance_pct,
        voltage_imbalance_pct,
        voltage_deviation_pct,
        faults = faults.len(),
        "electrical diagnosis"
    );
    if faults.contains(&FaultKind::CriticalImbalance) {
        tracing::warn!(imbalance_pct, "phase imbalance beyond NEMA operating limit");
    }

    Ok(ElectricalDiagnosis {
        mean_current_a,
        mean_voltage_v,
        current_imbalance_pct,
        voltage_imbalance_pct,
        imbalance_pct,
        voltage_deviation_pct,
        power_factor,
        faults,
    })
}
