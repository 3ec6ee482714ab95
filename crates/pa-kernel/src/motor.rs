//! Motor performance model.
//!
//! ```text
//! P_in   = √3 · V̄ · Ī · PF
//! load   = clamp(P_in / P_rated, 0, max_load)
//! η_base = curve(class, load)
//! η      = η_base − η_base · (1 − k_NEMA(imbalance))   when HighImbalance
//! P_shaft = P_in · η
//! ```

use crate::config::MotorSettings;
use crate::electrical::ElectricalDiagnosis;
use crate::error::KernelResult;
use crate::types::{FaultKind, FieldReading, NameplateSpec};
use pa_core::units::{Power, amps, kw, to_kw, volts};
use pa_curves::{CurveClass, CurveLibrary};
use serde::{Deserialize, Serialize};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorPerformance {
    pub curve_class: CurveClass,
    /// Electrical input power (kW)
    pub input_power_kw: f64,
    /// Input power over rated power before clamping
    pub raw_load_fraction: f64,
    /// Load fraction clamped to [0, max_load_fraction]
    pub load_fraction: f64,
    /// Efficiency read from the reference curve
    pub base_efficiency: f64,
    /// NEMA derating factor applied (1.0 when no derating)
    pub derating_factor: f64,
    /// Efficiency points removed by derating
    pub derating_penalty: f64,
    /// Derated motor efficiency
    pub efficiency: f64,
    /// Shaft power delivered to the pump (kW)
    pub shaft_power_kw: f64,
    /// Set when the raw load fraction exceeds 1.0
    pub overload: bool,
}

/// Evaluate the motor at the measured operating point.
///
/// Overload is reported through [`MotorPerformance::overload`], never as an
/// error.
pub fn evaluate(
    spec: &NameplateSpec,
    reading: &FieldReading,
    diagnosis: &ElectricalDiagnosis,
    curves: &CurveLibrary,
    settings: &MotorSettings,
) -> KernelResult<MotorPerformance> {
    spec.validate()?;

    let input: Power = volts(reading.mean_voltage_v())
        * amps(reading.mean_current_a())
        * (SQRT_3 * diagnosis.power_factor);
    let rated: Power = kw(spec.rated_power_kw);

    let raw_load_fraction = (input / rated).value;
    let load_fraction = raw_load_fraction.clamp(0.0, settings.max_load_fraction);
    let overload = raw_load_fraction > 1.0;
    if overload {
        tracing::warn!(
            load_fraction = raw_load_fraction,
            rated_kw = spec.rated_power_kw,
            "motor running above rated load"
        );
    }

    let curve_class = spec.curve_class();
    let base_efficiency = curves.efficiency_at(curve_class, load_fraction)?;

    let derating_factor = if diagnosis.has(FaultKind::HighImbalance) {
        curves.derating_factor(diagnosis.imbalance_pct)
    } else {
        1.0
    };
    let derating_penalty = base_efficiency * (1.0 - derating_factor);
    let efficiency = base_efficiency - derating_penalty;

    let shaft: Power = input * efficiency;

    tracing::debug!(
        %curve_class,
        load_fraction,
        base_efficiency,
        efficiency,
        "motor evaluated"
    );

    Ok(MotorPerformance {
        curve_class,
        input_power_kw: to_kw(input),
        raw_load_fraction,
        load_fraction,
        base_efficiency,
        derating_factor,
        derating_penalty,
        efficiency,
        shaft_power_kw: to_kw(shaft),
        overload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridLimits;
    use crate::electrical::diagnose;
    use crate::error::KernelError;
    use chrono::{TimeZone, Utc};
    use pa_curves::{EfficiencyClass, PoleCount};

    fn spec(poles: PoleCount) -> NameplateSpec {
        NameplateSpec {
            rated_power_kw: 30.0,
            rated_voltage_v: 415.0,
            rated_current_a: 52.0,
            poles,
            rated_speed_rpm: 1475.0,
            efficiency_class: EfficiencyClass::IE3,
        }
    }

    fn reading(currents: [f64; 3]) -> FieldReading {
        FieldReading {
            currents_a: currents,
            voltages_v: [415.0; 3],
            discharge_pressure_bar: 4.0,
            flow_rate_m3_h: 150.0,
            suction_pressure_bar: None,
            power_factor: Some(0.85),
            timestamp: Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
        }
    }

    fn eval(spec: &NameplateSpec, r: &FieldReading) -> KernelResult<MotorPerformance> {
        let d = diagnose(&r.currents_a, &r.voltages_v, 415.0, 0.85, &GridLimits::default())?;
        evaluate(spec, r, &d, CurveLibrary::standard(), &MotorSettings::default())
    }

    #[test]
    fn input_power_and_load() {
        let m = eval(&spec(PoleCount::Four), &reading([40.0; 3])).unwrap();
        let expected_kw = SQRT_3 * 415.0 * 40.0 * 0.85 / 1000.0;
        assert!((m.input_power_kw - expected_kw).abs() < 1e-9);
        assert!((m.load_fraction - expected_kw / 30.0).abs() < 1e-9);
        assert!(!m.overload);
        assert_eq!(m.derating_factor, 1.0);
        assert_eq!(m.efficiency, m.base_efficiency);
    }

    #[test]
    fn shaft_power_is_input_times_efficiency() {
        let m = eval(&spec(PoleCount::Four), &reading([40.0; 3])).unwrap();
        assert!((m.shaft_power_kw - m.input_power_kw * m.efficiency).abs() < 1e-9);
        assert!(m.shaft_power_kw < m.input_power_kw);
    }

    #[test]
    fn overload_is_flagged_and_clamped() {
        // ~41 kW into a 30 kW motor
        let m = eval(&spec(PoleCount::Four), &reading([67.0; 3])).unwrap();
        assert!(m.overload);
        assert!(m.raw_load_fraction > 1.1);
        assert_eq!(m.load_fraction, 1.1);
    }

    #[test]
    fn mild_overload_is_kept() {
        let m = eval(&spec(PoleCount::Four), &reading([52.0; 3])).unwrap();
        assert!(m.overload);
        assert!(m.load_fraction > 1.0 && m.load_fraction < 1.1);
        assert_eq!(m.load_fraction, m.raw_load_fraction);
    }

    #[test]
    fn imbalance_derates_efficiency() {
        let balanced = eval(&spec(PoleCount::Four), &reading([40.0; 3])).unwrap();
        let skewed = eval(&spec(PoleCount::Four), &reading([38.8, 40.0, 41.2])).unwrap();
        // 3 % imbalance -> NEMA factor 0.88
        assert!((skewed.derating_factor - 0.88).abs() < 1e-9);
        assert!(skewed.efficiency < skewed.base_efficiency);
        assert!(
            (skewed.derating_penalty - skewed.base_efficiency * 0.12).abs() < 1e-9
        );
        assert!(skewed.shaft_power_kw < balanced.shaft_power_kw);
    }

    #[test]
    fn eight_pole_has_no_curve() {
        let err = eval(&spec(PoleCount::Eight), &reading([40.0; 3])).unwrap_err();
        assert!(matches!(err, KernelError::UnknownCurveClass { .. }));
    }
}
