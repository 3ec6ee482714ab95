//! Combined wire-to-water efficiency.

use crate::config::Benchmark;
use crate::hydraulic::HydraulicPerformance;
use crate::motor::MotorPerformance;
use crate::types::FaultKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EfficiencyResult {
    /// Motor load fraction, clamped
    pub load_fraction: f64,
    pub motor_efficiency: f64,
    pub hydraulic_efficiency: f64,
    /// `motor_efficiency * hydraulic_efficiency`
    pub combined_efficiency: f64,
    pub benchmark_efficiency: f64,
    /// `max(0, benchmark - combined)`
    pub efficiency_gap: f64,
    /// Non-error conditions attached to this result
    #[serde(default)]
    pub flags: BTreeSet<FaultKind>,
}

impl EfficiencyResult {
    pub fn combine(
        motor: &MotorPerformance,
        hydraulic: &HydraulicPerformance,
        benchmark: &Benchmark,
    ) -> Self {
        let combined_efficiency = motor.efficiency * hydraulic.efficiency;
        let benchmark_efficiency = benchmark.combined();
        let mut flags = BTreeSet::new();
        if motor.overload {
            flags.insert(FaultKind::OverloadCondition);
        }

        Self {
            load_fraction: motor.load_fraction,
            motor_efficiency: motor.efficiency,
            hydraulic_efficiency: hydraulic.efficiency,
            combined_efficiency,
            benchmark_efficiency,
            efficiency_gap: (benchmark_efficiency - combined_efficiency).max(0.0),
            flags,
        }
    }
}
