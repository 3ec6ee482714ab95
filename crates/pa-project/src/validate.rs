//! Project validation logic.
//!
//! Catches what a form layer would: missing identifiers, duplicate reading
//! ids, values of the wrong sign. Physical plausibility of a reading is left
//! to the kernel.

use crate::schema::{AuditProject, ElectricalDef, ExchangeRatesDef, LATEST_VERSION, ReadingDef};
use pa_core::units::constants::MAX_HOURS_PER_YEAR;
use pa_kernel::TariffContext;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing field: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_negative(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative and finite"))
    }
}

pub fn validate_project(project: &AuditProject) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if project.site.station_id.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "site.station_id".to_string(),
        });
    }
    if project.site.auditor.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "site.auditor".to_string(),
        });
    }

    project
        .nameplate
        .validate()
        .map_err(|e| ValidationError::InvalidValue {
            field: "nameplate".to_string(),
            value: e.to_string(),
            reason: "ratings must be positive and finite".to_string(),
        })?;

    validate_tariff(&project.tariff)?;

    project
        .settings
        .validate()
        .map_err(|e| ValidationError::InvalidValue {
            field: "settings".to_string(),
            value: e.to_string(),
            reason: "kernel settings rejected".to_string(),
        })?;

    let mut reading_ids = HashSet::new();
    for reading in &project.readings {
        if !reading_ids.insert(reading.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: reading.id.clone(),
                context: "readings".to_string(),
            });
        }
        validate_reading(reading)?;
    }

    if let Some(rates) = &project.exchange_rates {
        validate_rates(rates, &project.tariff)?;
    }

    Ok(())
}

fn validate_tariff(tariff: &TariffContext) -> Result<(), ValidationError> {
    non_negative("tariff.rate_per_kwh", tariff.rate_per_kwh)?;
    non_negative("tariff.co2_kg_per_kwh", tariff.co2_kg_per_kwh)?;
    let hours = tariff.operating_hours_per_year;
    non_negative("tariff.operating_hours_per_year", hours)?;
    if hours > MAX_HOURS_PER_YEAR {
        return Err(invalid(
            "tariff.operating_hours_per_year",
            hours,
            "exceeds the hours in a year",
        ));
    }
    Ok(())
}

fn validate_reading(reading: &ReadingDef) -> Result<(), ValidationError> {
    if reading.id.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "reading id".to_string(),
        });
    }
    let field = |name: &str| format!("reading '{}' {}", reading.id, name);

    match &reading.electrical {
        ElectricalDef::ThreePhase {
            currents_a,
            voltages_v,
        } => {
            for (i, &c) in currents_a.iter().enumerate() {
                non_negative(field(&format!("currents_a[{i}]")), c)?;
            }
            for (i, &v) in voltages_v.iter().enumerate() {
                non_negative(field(&format!("voltages_v[{i}]")), v)?;
            }
        }
        ElectricalDef::SinglePhase {
            current_a,
            voltage_v,
        } => {
            non_negative(field("current_a"), *current_a)?;
            non_negative(field("voltage_v"), *voltage_v)?;
        }
    }

    non_negative(field("flow_rate_m3_h"), reading.flow_rate_m3_h)?;
    if !reading.discharge_pressure_bar.is_finite() {
        return Err(invalid(
            field("discharge_pressure_bar"),
            reading.discharge_pressure_bar,
            "must be finite",
        ));
    }
    if let Some(s) = reading.suction_pressure_bar {
        if !s.is_finite() {
            return Err(invalid(field("suction_pressure_bar"), s, "must be finite"));
        }
    }
    if let Some(pf) = reading.power_factor {
        if !(pf.is_finite() && pf > 0.0 && pf <= 1.0) {
            return Err(invalid(field("power_factor"), pf, "must be in (0, 1]"));
        }
    }
    Ok(())
}

fn validate_rates(rates: &ExchangeRatesDef, tariff: &TariffContext) -> Result<(), ValidationError> {
    for (currency, &rate) in &rates.rates {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(invalid(
                format!("exchange_rates.rates.{currency}"),
                rate,
                "must be positive and finite",
            ));
        }
    }
    if tariff.currency != rates.report_currency && !rates.rates.contains_key(&tariff.currency) {
        return Err(ValidationError::Missing {
            field: format!("exchange_rates.rates.{}", tariff.currency),
        });
    }
    Ok(())
}
