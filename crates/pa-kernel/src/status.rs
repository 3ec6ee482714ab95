//! Operating-condition assessment.
//!
//! Rules are checked in a fixed order and the first match wins:
//! grid instability, critical phase imbalance, dry run, burst pipe,
//! dead-head, motor overload, poor wet-end efficiency. A reading that
//! trips none of them is [`OperatingStatus::Optimal`].

use crate::config::StatusThresholds;
use crate::electrical::ElectricalDiagnosis;
use crate::hydraulic::HydraulicPerformance;
use crate::motor::MotorPerformance;
use crate::types::{FaultKind, FieldReading};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Normal => "NORMAL",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Field action for this severity.
    pub fn action_plan(self) -> &'static str {
        match self {
            Severity::Normal => "None. System healthy.",
            Severity::Warning => "Monitor closely. Consider pump maintenance.",
            Severity::Critical => "Stop the pump and correct the fault before further operation.",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingStatus {
    Optimal,
    GridInstability,
    PhaseImbalance,
    DryRun,
    BurstPipe,
    DeadHead,
    MotorOverload,
    PoorEfficiency,
}

impl OperatingStatus {
    pub fn severity(self) -> Severity {
        use OperatingStatus::*;
        match self {
            Optimal => Severity::Normal,
            GridInstability | PhaseImbalance | DryRun | BurstPipe => Severity::Critical,
            DeadHead | MotorOverload | PoorEfficiency => Severity::Warning,
        }
    }

    pub fn label(self) -> &'static str {
        use OperatingStatus::*;
        match self {
            Optimal => "optimal",
            GridInstability => "grid instability",
            PhaseImbalance => "phase imbalance",
            DryRun => "dry run detected",
            BurstPipe => "burst pipe / zero head",
            DeadHead => "blockage / dead-head",
            MotorOverload => "motor overload",
            PoorEfficiency => "poor efficiency",
        }
    }

    /// What the field crew should check first.
    pub fn recommended_action(self) -> &'static str {
        use OperatingStatus::*;
        match self {
            Optimal => "No action required.",
            GridInstability => "Check supply voltage with the utility; protect the motor from under/over-voltage.",
            PhaseImbalance => "Inspect cables, terminations and contactors for a failing phase.",
            DryRun => "Stop the pump; check suction level, priming and intake screens.",
            BurstPipe => "Inspect the rising main for a burst or open outlet.",
            DeadHead => "Check for a closed valve or blocked discharge line.",
            MotorOverload => "Check the impeller for rubbing and the duty point against the motor rating.",
            PoorEfficiency => "Inspect the impeller and wear rings; consider refurbishment.",
        }
    }
}

impl fmt::Display for OperatingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Assessment {
    pub status: OperatingStatus,
    pub severity: Severity,
    pub reason: String,
}

impl Assessment {
    fn new(status: OperatingStatus, reason: String) -> Self {
        Self {
            status,
            severity: status.severity(),
            reason,
        }
    }
}

/// Classify the operating condition of one reading.
///
/// Load rules use the unclamped load fraction so a heavy overload is not
/// hidden by the reporting clamp.
pub fn assess(
    diagnosis: &ElectricalDiagnosis,
    motor: &MotorPerformance,
    hydraulic: &HydraulicPerformance,
    reading: &FieldReading,
    thresholds: &StatusThresholds,
) -> Assessment {
    let load = motor.raw_load_fraction;
    let pressure = reading.discharge_pressure_bar;
    let flow = reading.flow_rate_m3_h;

    let assessment = if diagnosis.has(FaultKind::UnderVoltage) {
        Assessment::new(
            OperatingStatus::GridInstability,
            format!(
                "under-voltage of {:.1}% (overheating risk)",
                diagnosis.voltage_deviation_pct
            ),
        )
    } else if diagnosis.has(FaultKind::OverVoltage) {
        Assessment::new(
            OperatingStatus::GridInstability,
            format!(
                "over-voltage of {:+.1}% (insulation risk)",
                diagnosis.voltage_deviation_pct
            ),
        )
    } else if diagnosis.has(FaultKind::CriticalImbalance) {
        Assessment::new(
            OperatingStatus::PhaseImbalance,
            format!(
                "{:.1}% phase imbalance; motor windings degrading",
                diagnosis.imbalance_pct
            ),
        )
    } else if load < thresholds.dry_run_load {
        Assessment::new(
            OperatingStatus::DryRun,
            format!(
                "load {:.0}% is below {:.0}%; pump likely running without water",
                load * 100.0,
                thresholds.dry_run_load * 100.0
            ),
        )
    } else if load > thresholds.burst_pipe_load && pressure < thresholds.burst_pipe_pressure_bar {
        Assessment::new(
            OperatingStatus::BurstPipe,
            format!("high power ({:.0}% load) against {pressure:.2} bar discharge", load * 100.0),
        )
    } else if pressure > thresholds.dead_head_pressure_bar && flow < thresholds.dead_head_flow_m3_h {
        Assessment::new(
            OperatingStatus::DeadHead,
            format!("{pressure:.2} bar discharge with {flow:.2} m³/h flow"),
        )
    } else if load > thresholds.overload_load {
        Assessment::new(
            OperatingStatus::MotorOverload,
            format!("motor at {:.0}% of rated power; thermal risk", load * 100.0),
        )
    } else if hydraulic.efficiency < thresholds.poor_pump_efficiency {
        Assessment::new(
            OperatingStatus::PoorEfficiency,
            format!(
                "wet-end efficiency {:.1}%; possible worn impeller",
                hydraulic.efficiency * 100.0
            ),
        )
    } else {
        Assessment::new(
            OperatingStatus::Optimal,
            "operating within normal parameters".to_string(),
        )
    };

    tracing::debug!(status = %assessment.status, severity = %assessment.severity, "assessed");
    assessment
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pa_curves::{CurveClass, EfficiencyClass, PoleCount, PowerBand};
    use std::collections::BTreeSet;

    fn diagnosis(faults: &[FaultKind]) -> ElectricalDiagnosis {
        ElectricalDiagnosis {
            mean_current_a: 44.0,
            mean_voltage_v: 415.0,
            current_imbalance_pct: 0.5,
            voltage_imbalance_pct: 0.2,
            imbalance_pct: 0.5,
            voltage_deviation_pct: 0.0,
            power_factor: 0.85,
            faults: faults.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn motor(load: f64) -> MotorPerformance {
        MotorPerformance {
            curve_class: CurveClass::new(EfficiencyClass::IE3, PoleCount::Four, PowerBand::Medium),
            input_power_kw: 30.0 * load,
            raw_load_fraction: load,
            load_fraction: load.min(1.1),
            base_efficiency: 0.93,
            derating_factor: 1.0,
            derating_penalty: 0.0,
            efficiency: 0.93,
            shaft_power_kw: 30.0 * load * 0.93,
            overload: load > 1.0,
        }
    }

    fn wet_end(efficiency: f64) -> HydraulicPerformance {
        HydraulicPerformance {
            differential_pressure_bar: 4.0,
            head_m: 40.8,
            flow_rate_m3_h: 150.0,
            hydraulic_power_kw: 20.0 * efficiency,
            shaft_power_kw: 20.0,
            efficiency,
        }
    }

    fn reading(pressure: f64, flow: f64) -> FieldReading {
        FieldReading {
            currents_a: [44.0; 3],
            voltages_v: [415.0; 3],
            discharge_pressure_bar: pressure,
            flow_rate_m3_h: flow,
            suction_pressure_bar: None,
            power_factor: None,
            timestamp: Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap(),
        }
    }

    fn run(faults: &[FaultKind], load: f64, eff: f64, pressure: f64, flow: f64) -> Assessment {
        assess(
            &diagnosis(faults),
            &motor(load),
            &wet_end(eff),
            &reading(pressure, flow),
            &StatusThresholds::default(),
        )
    }

    #[test]
    fn healthy_reading_is_optimal() {
        let a = run(&[], 0.8, 0.7, 4.0, 150.0);
        assert_eq!(a.status, OperatingStatus::Optimal);
        assert_eq!(a.severity, Severity::Normal);
    }

    #[test]
    fn grid_instability_outranks_everything() {
        let a = run(
            &[FaultKind::UnderVoltage, FaultKind::HighImbalance, FaultKind::CriticalImbalance],
            0.1,
            0.2,
            0.5,
            0.0,
        );
        assert_eq!(a.status, OperatingStatus::GridInstability);
        assert_eq!(a.severity, Severity::Critical);
    }

    #[test]
    fn imbalance_then_dry_run() {
        let a = run(&[FaultKind::HighImbalance, FaultKind::CriticalImbalance], 0.1, 0.7, 4.0, 150.0);
        assert_eq!(a.status, OperatingStatus::PhaseImbalance);
        let a = run(&[FaultKind::HighImbalance], 0.1, 0.7, 4.0, 150.0);
        assert_eq!(a.status, OperatingStatus::DryRun);
    }

    #[test]
    fn burst_pipe_and_dead_head() {
        assert_eq!(run(&[], 0.9, 0.7, 0.8, 300.0).status, OperatingStatus::BurstPipe);
        // Low pressure at moderate load is not a burst main.
        assert_eq!(run(&[], 0.5, 0.7, 0.8, 300.0).status, OperatingStatus::Optimal);
        let a = run(&[], 0.8, 0.7, 9.5, 0.5);
        assert_eq!(a.status, OperatingStatus::DeadHead);
        assert_eq!(a.severity, Severity::Warning);
    }

    #[test]
    fn overload_and_poor_efficiency() {
        assert_eq!(run(&[], 1.2, 0.7, 4.0, 150.0).status, OperatingStatus::MotorOverload);
        assert_eq!(run(&[], 1.02, 0.7, 4.0, 150.0).status, OperatingStatus::Optimal);
        assert_eq!(run(&[], 0.8, 0.3, 4.0, 150.0).status, OperatingStatus::PoorEfficiency);
    }

    #[test]
    fn every_status_has_an_action() {
        use OperatingStatus::*;
        for s in [Optimal, GridInstability, PhaseImbalance, DryRun, BurstPipe, DeadHead, MotorOverload, PoorEfficiency] {
            assert!(!s.recommended_action().is_empty());
            assert!(!s.severity().action_plan().is_empty());
        }
    }
}
