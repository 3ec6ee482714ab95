//! pa-kernel: physics and diagnostics for 3-phase pump installations.
//!
//! Pipeline, leaf-first:
//! - [`electrical`]: phase imbalance, voltage deviation, grid-quality faults
//! - [`motor`]: load fraction, curve-based motor efficiency, imbalance derating
//! - [`hydraulic`]: head, hydraulic power and wet-end efficiency
//! - [`efficiency`]: combined wire-to-water efficiency and benchmark gap
//! - [`financial`]: wasted energy, cost, OpEx and carbon
//! - [`status`]: operating-condition assessment
//! - [`audit`]: runs every stage for one reading
//!
//! Every stage is a deterministic function of its inputs. Stages fail with a
//! single [`KernelError`] kind and never substitute defaults for bad data.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use pa_curves::{CurveLibrary, EfficiencyClass, PoleCount};
//! use pa_kernel::{CurrencyCode, FieldReading, KernelConfig, NameplateSpec, TariffContext, run_audit};
//!
//! let spec = NameplateSpec {
//!     rated_power_kw: 30.0,
//!     rated_voltage_v: 415.0,
//!     rated_current_a: 52.0,
//!     poles: PoleCount::Four,
//!     rated_speed_rpm: 1475.0,
//!     efficiency_class: EfficiencyClass::IE3,
//! };
//! let reading = FieldReading {
//!     currents_a: [44.0, 43.5, 44.5],
//!     voltages_v: [414.0, 416.0, 415.0],
//!     discharge_pressure_bar: 4.2,
//!     flow_rate_m3_h: 150.0,
//!     suction_pressure_bar: Some(0.3),
//!     power_factor: Some(0.86),
//!     timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
//! };
//! let tariff = TariffContext {
//!     rate_per_kwh: 0.15,
//!     currency: CurrencyCode::new("USD").unwrap(),
//!     operating_hours_per_year: 6000.0,
//!     co2_kg_per_kwh: 0.4,
//! };
//!
//! let outcome = run_audit(
//!     &spec,
//!     &reading,
//!     &tariff,
//!     &KernelConfig::default(),
//!     CurveLibrary::standard(),
//! )
//! .unwrap();
//! assert!(outcome.efficiency.combined_efficiency < outcome.efficiency.motor_efficiency);
//! ```

pub mod audit;
pub mod config;
pub mod efficiency;
pub mod electrical;
pub mod error;
pub mod financial;
pub mod hydraulic;
pub mod motor;
pub mod status;
pub mod types;

// Re-exports
pub use audit::{AuditOutcome, run_audit};
pub use config::{Benchmark, GridLimits, HydraulicSettings, KernelConfig, MotorSettings, StatusThresholds};
pub use efficiency::EfficiencyResult;
pub use electrical::{ElectricalDiagnosis, diagnose, phase_imbalance_pct};
pub use error::{KernelError, KernelResult};
pub use financial::{
    CurrencyCode, FinancialImpact, Money, OperatingCost, TariffContext, estimate,
    estimate_operating_cost,
};
pub use hydraulic::HydraulicPerformance;
pub use motor::MotorPerformance;
pub use status::{Assessment, OperatingStatus, Severity, assess};
pub use types::{FaultKind, FieldReading, NameplateSpec};
