//! End-to-end kernel pipeline for one reading.

use crate::config::KernelConfig;
use crate::efficiency::EfficiencyResult;
use crate::electrical::{self, ElectricalDiagnosis};
use crate::error::KernelResult;
use crate::financial::{self, FinancialImpact, OperatingCost, TariffContext};
use crate::hydraulic::{self, HydraulicPerformance};
use crate::motor::{self, MotorPerformance};
use crate::status::{self, Assessment};
use crate::types::{FieldReading, NameplateSpec};
use pa_curves::CurveLibrary;
use serde::{Deserialize, Serialize};

/// Everything the kernel derives from one reading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub diagnosis: ElectricalDiagnosis,
    pub motor: MotorPerformance,
    pub hydraulic: HydraulicPerformance,
    pub efficiency: EfficiencyResult,
    pub financial: FinancialImpact,
    pub operating_cost: OperatingCost,
    pub assessment: Assessment,
}

/// Run every stage for one reading.
///
/// Stages run leaf-first and the first failure is returned unchanged; no
/// stage substitutes a default for data it cannot use. A nameplate or
/// configuration that does not validate fails before any stage runs.
pub fn run_audit(
    spec: &NameplateSpec,
    reading: &FieldReading,
    tariff: &TariffContext,
    config: &KernelConfig,
    curves: &CurveLibrary,
) -> KernelResult<AuditOutcome> {
    spec.validate()?;
    config.validate()?;

    let power_factor = reading
        .power_factor
        .unwrap_or(config.motor.default_power_factor);
    let diagnosis = electrical::diagnose(
        &reading.currents_a,
        &reading.voltages_v,
        spec.rated_voltage_v,
        power_factor,
        &config.grid,
    )?;

    let motor = motor::evaluate(spec, reading, &diagnosis, curves, &config.motor)?;
    let hydraulic = hydraulic::evaluate(motor.shaft_power_kw, reading, &config.hydraulic)?;
    let efficiency = EfficiencyResult::combine(&motor, &hydraulic, &config.benchmark);

    let financial = financial::estimate(
        efficiency.combined_efficiency,
        efficiency.benchmark_efficiency,
        spec.rated_power_kw,
        tariff.operating_hours_per_year,
        tariff.rate_per_kwh,
        &tariff.currency,
    )?;
    let operating_cost = financial::estimate_operating_cost(
        motor.input_power_kw,
        tariff.operating_hours_per_year,
        tariff.rate_per_kwh,
        &tariff.currency,
        tariff.co2_kg_per_kwh,
    )?;

    let assessment = status::assess(&diagnosis, &motor, &hydraulic, reading, &config.status);

    tracing::info!(
        combined_efficiency = efficiency.combined_efficiency,
        wasted_kwh = financial.wasted_energy_kwh,
        status = %assessment.status,
        "audit complete"
    );

    Ok(AuditOutcome {
        diagnosis,
        motor,
        hydraulic,
        efficiency,
        financial,
        operating_cost,
        assessment,
    })
}
