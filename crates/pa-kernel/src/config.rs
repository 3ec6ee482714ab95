//! Kernel configuration.
//!
//! Every threshold the pipeline applies lives here so an audit project can
//! override it. All sections default to the values used in the field tool.

use crate::error::{KernelError, KernelResult};
use pa_core::units::constants::{G0_MPS2, WATER_DENSITY_KG_M3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub grid: GridLimits,
    pub motor: MotorSettings,
    pub hydraulic: HydraulicSettings,
    pub benchmark: Benchmark,
    pub status: StatusThresholds,
}

/// Grid power-quality limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLimits {
    /// Imbalance above which NEMA derating applies (%)
    pub imbalance_warning_pct: f64,
    /// Imbalance above which the motor should not be run (%)
    pub imbalance_critical_pct: f64,
    /// Lower voltage deviation bound (%, negative)
    pub under_voltage_pct: f64,
    /// Upper voltage deviation bound (%)
    pub over_voltage_pct: f64,
    /// Mean current at or below which the pump is treated as off (A)
    pub min_load_current_a: f64,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            imbalance_warning_pct: 2.0,
            imbalance_critical_pct: 5.0,
            under_voltage_pct: -10.0,
            over_voltage_pct: 10.0,
            min_load_current_a: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorSettings {
    /// Used when a reading carries no measured power factor
    pub default_power_factor: f64,
    /// Upper clamp for the reported load fraction
    pub max_load_fraction: f64,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            default_power_factor: 0.85,
            max_load_fraction: 1.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicSettings {
    pub fluid_density_kg_m3: f64,
    pub gravity_mps2: f64,
}

impl Default for HydraulicSettings {
    fn default() -> Self {
        Self {
            fluid_density_kg_m3: WATER_DENSITY_KG_M3,
            gravity_mps2: G0_MPS2,
        }
    }
}

/// Best-practice reference installation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmark {
    /// Premium-efficiency motor near its best operating point
    pub motor_efficiency: f64,
    /// Well-selected centrifugal pump at its best efficiency point
    pub pump_efficiency: f64,
}

impl Benchmark {
    pub fn combined(&self) -> f64 {
        self.motor_efficiency * self.pump_efficiency
    }
}

impl Default for Benchmark {
    fn default() -> Self {
        Self {
            motor_efficiency: 0.92,
            pump_efficiency: 0.75,
        }
    }
}

/// Thresholds for the operating-condition assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Load fraction below which the pump is taken to be running dry
    pub dry_run_load: f64,
    /// Load fraction above which low discharge pressure means a burst main
    pub burst_pipe_load: f64,
    pub burst_pipe_pressure_bar: f64,
    /// Discharge pressure above which near-zero flow means a closed valve or blockage
    pub dead_head_pressure_bar: f64,
    pub dead_head_flow_m3_h: f64,
    /// Load fraction above which overload is reported as a warning
    pub overload_load: f64,
    /// Wet-end efficiency below which the impeller is suspect
    pub poor_pump_efficiency: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            dry_run_load: 0.30,
            burst_pipe_load: 0.65,
            burst_pipe_pressure_bar: 1.5,
            dead_head_pressure_bar: 8.0,
            dead_head_flow_m3_h: 2.0,
            overload_load: 1.05,
            poor_pump_efficiency: 0.45,
        }
    }
}

fn fraction(v: f64, what: &'static str) -> KernelResult<()> {
    if v.is_finite() && v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidInput { what })
    }
}

fn positive(v: f64, what: &'static str) -> KernelResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidInput { what })
    }
}

impl KernelConfig {
    pub fn validate(&self) -> KernelResult<()> {
        let g = &self.grid;
        positive(g.imbalance_warning_pct, "imbalance warning threshold must be positive")?;
        if !(g.imbalance_critical_pct >= g.imbalance_warning_pct) {
            return Err(KernelError::InvalidInput {
                what: "critical imbalance threshold must not be below the warning threshold",
            });
        }
        if !(g.under_voltage_pct < 0.0 && g.over_voltage_pct > 0.0) {
            return Err(KernelError::InvalidInput {
                what: "voltage bounds must straddle the nominal voltage",
            });
        }
        if !(g.min_load_current_a.is_finite() && g.min_load_current_a >= 0.0) {
            return Err(KernelError::InvalidInput {
                what: "minimum load current must be non-negative",
            });
        }

        fraction(self.motor.default_power_factor, "default power factor must be in (0, 1]")?;
        if !(self.motor.max_load_fraction.is_finite() && self.motor.max_load_fraction >= 1.0) {
            return Err(KernelError::InvalidInput {
                what: "maximum load fraction must be at least 1",
            });
        }

        positive(self.hydraulic.fluid_density_kg_m3, "fluid density must be positive")?;
        positive(self.hydraulic.gravity_mps2, "gravity must be positive")?;

        fraction(self.benchmark.motor_efficiency, "benchmark motor efficiency must be in (0, 1]")?;
        fraction(self.benchmark.pump_efficiency, "benchmark pump efficiency must be in (0, 1]")?;

        let s = &self.status;
        fraction(s.dry_run_load, "dry-run load must be in (0, 1]")?;
        fraction(s.poor_pump_efficiency, "poor pump efficiency must be in (0, 1]")?;
        positive(s.overload_load, "overload load must be positive")?;
        positive(s.burst_pipe_load, "burst-pipe load must be positive")?;
        positive(s.burst_pipe_pressure_bar, "burst-pipe pressure must be positive")?;
        positive(s.dead_head_pressure_bar, "dead-head pressure must be positive")?;
        positive(s.dead_head_flow_m3_h, "dead-head flow must be positive")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        KernelConfig::default().validate().unwrap();
    }

    #[test]
    fn benchmark_combined() {
        assert!((Benchmark::default().combined() - 0.69).abs() < 1e-12);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: KernelConfig = serde_yaml::from_str(
            "grid:\n  imbalance_warning_pct: 1.5\nmotor:\n  default_power_factor: 0.9\n",
        )
        .unwrap();
        assert_eq!(cfg.grid.imbalance_warning_pct, 1.5);
        assert_eq!(cfg.grid.imbalance_critical_pct, 5.0);
        assert_eq!(cfg.motor.default_power_factor, 0.9);
        assert_eq!(cfg.hydraulic, HydraulicSettings::default());
    }

    #[test]
    fn rejects_inverted_imbalance_thresholds() {
        let mut cfg = KernelConfig::default();
        cfg.grid.imbalance_critical_pct = 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_power_factor_above_one() {
        let mut cfg = KernelConfig::default();
        cfg.motor.default_power_factor = 1.2;
        assert!(cfg.validate().is_err());
    }
}
