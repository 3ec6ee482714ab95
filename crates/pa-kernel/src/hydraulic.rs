//! Hydraulic (wet-end) model.
//!
//! Isolates pump losses from motor losses by comparing the water power
//! actually delivered against the shaft power the motor model says it
//! received:
//!
//! ```text
//! H       = Δp / (ρ g)
//! P_hyd   = ρ g Q H
//! η_pump  = P_hyd / P_shaft
//! ```

use crate::config::HydraulicSettings;
use crate::error::{KernelError, KernelResult};
use crate::types::FieldReading;
use pa_core::numeric::{ensure_finite, ensure_non_negative};
use pa_core::units::{Length, Power, bar, kg_per_m3, kw, m3ph, mps2, to_kw, to_m};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HydraulicPerformance {
    /// Pressure rise across the pump (bar)
    pub differential_pressure_bar: f64,
    /// Differential head (m of fluid)
    pub head_m: f64,
    pub flow_rate_m3_h: f64,
    /// Water power delivered (kW)
    pub hydraulic_power_kw: f64,
    /// Shaft power received (kW)
    pub shaft_power_kw: f64,
    /// Wet-end efficiency, in [0, 1]
    pub efficiency: f64,
}

/// Evaluate the wet end for a given shaft power.
///
/// # Errors
/// - [`KernelError::ImplausibleReading`] when suction pressure exceeds
///   discharge pressure, or when the water power exceeds the shaft power.
///   Both indicate a miscalibrated gauge or flow meter and are never clamped.
/// - [`KernelError::InvalidInput`] for non-positive shaft power or negative flow.
pub fn evaluate(
    shaft_power_kw: f64,
    reading: &FieldReading,
    settings: &HydraulicSettings,
) -> KernelResult<HydraulicPerformance> {
    ensure_finite(shaft_power_kw, "shaft power")?;
    if shaft_power_kw <= 0.0 {
        return Err(KernelError::InvalidInput {
            what: "shaft power must be positive",
        });
    }
    let flow_rate_m3_h = ensure_non_negative(reading.flow_rate_m3_h, "flow rate")?;
    ensure_finite(reading.discharge_pressure_bar, "discharge pressure")?;
    if let Some(suction) = reading.suction_pressure_bar {
        ensure_finite(suction, "suction pressure")?;
    }

    let differential_pressure_bar = reading.differential_pressure_bar();
    if differential_pressure_bar < 0.0 {
        return Err(KernelError::ImplausibleReading {
            what: "suction pressure exceeds discharge pressure",
            value: differential_pressure_bar,
        });
    }

    let rho = kg_per_m3(settings.fluid_density_kg_m3);
    let g = mps2(settings.gravity_mps2);

    let head: Length = bar(differential_pressure_bar) / (rho * g);
    let hydraulic: Power = rho * g * m3ph(flow_rate_m3_h) * head;
    let shaft: Power = kw(shaft_power_kw);

    let efficiency = (hydraulic / shaft).value;
    if efficiency > 1.0 {
        return Err(KernelError::ImplausibleReading {
            what: "hydraulic output exceeds shaft power",
            value: efficiency,
        });
    }

    tracing::debug!(
        head_m = to_m(head),
        hydraulic_kw = to_kw(hydraulic),
        efficiency,
        "wet end evaluated"
    );

    Ok(HydraulicPerformance {
        differential_pressure_bar,
        head_m: to_m(head),
        flow_rate_m3_h,
        hydraulic_power_kw: to_kw(hydraulic),
        shaft_power_kw,
        efficiency,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_returns_efficiency_above_one(
            shaft in 0.5_f64..200.0,
            discharge in 0.0_f64..16.0,
            flow in 0.0_f64..800.0,
        ) {
            let r = FieldReading {
                currents_a: [40.0; 3],
                voltages_v: [415.0; 3],
                discharge_pressure_bar: discharge,
                flow_rate_m3_h: flow,
                suction_pressure_bar: None,
                power_factor: None,
                timestamp: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            };
            match evaluate(shaft, &r, &HydraulicSettings::default()) {
                Ok(h) => prop_assert!((0.0..=1.0).contains(&h.efficiency)),
                Err(e) => {
                    let implausible = matches!(e, KernelError::ImplausibleReading { .. });
                    prop_assert!(implausible, "unexpected error {:?}", e);
                }
            }
        }
    }
}
