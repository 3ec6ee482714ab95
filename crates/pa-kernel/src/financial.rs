//! Financial impact of an efficiency gap.
//!
//! The kernel tags amounts with the tariff's currency and never converts
//! between currencies; exchange rates are applied by the caller.

use crate::error::{KernelError, KernelResult};
use pa_core::numeric::{ensure_finite, ensure_non_negative};
use pa_core::units::constants::MAX_HOURS_PER_YEAR;
use pa_core::units::{Energy, hours, kw, to_kwh};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter upper-case currency code (ISO 4217 style, e.g. `TZS`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> KernelResult<Self> {
        let code = code.trim();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code.to_string()))
        } else {
            Err(KernelError::InvalidInput {
                what: "currency code must be three upper-case letters",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = KernelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<CurrencyCode> for String {
    fn from(c: CurrencyCode) -> Self {
        c.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount tagged with its currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Money {
    pub amount: f64,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: f64, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.amount)
    }
}

/// Tariff and duty figures injected by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffContext {
    /// Energy price per kWh in `currency`
    pub rate_per_kwh: f64,
    pub currency: CurrencyCode,
    /// Running hours per year
    pub operating_hours_per_year: f64,
    /// Grid emission factor (kg CO₂ per kWh)
    #[serde(default = "default_co2_kg_per_kwh")]
    pub co2_kg_per_kwh: f64,
}

fn default_co2_kg_per_kwh() -> f64 {
    0.4
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FinancialImpact {
    pub efficiency_gap: f64,
    pub operating_hours_per_year: f64,
    /// Energy lost against the benchmark (kWh per year)
    pub wasted_energy_kwh: f64,
    /// Cost of the wasted energy per year
    pub cost: Money,
    pub tariff_rate_per_kwh: f64,
}

impl FinancialImpact {
    pub fn currency(&self) -> &CurrencyCode {
        &self.cost.currency
    }
}

/// Yearly energy use and running cost at the measured input power.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatingCost {
    pub energy_kwh: f64,
    pub cost: Money,
    pub co2_tonnes: f64,
}

fn check_hours(h: f64) -> KernelResult<f64> {
    let h = ensure_non_negative(h, "operating hours per year")?;
    if h > MAX_HOURS_PER_YEAR {
        return Err(KernelError::InvalidInput {
            what: "operating hours exceed the hours in a year",
        });
    }
    Ok(h)
}

/// Cost of the gap between the installation and the benchmark.
///
/// ```text
/// gap    = max(0, benchmark − combined)
/// wasted = rated_power · hours · gap
/// cost   = wasted · tariff
/// ```
pub fn estimate(
    combined_efficiency: f64,
    benchmark_efficiency: f64,
    rated_power_kw: f64,
    operating_hours_per_year: f64,
    tariff_rate_per_kwh: f64,
    currency: &CurrencyCode,
) -> KernelResult<FinancialImpact> {
    ensure_finite(combined_efficiency, "combined efficiency")?;
    ensure_finite(benchmark_efficiency, "benchmark efficiency")?;
    ensure_finite(rated_power_kw, "rated power")?;
    if rated_power_kw <= 0.0 {
        return Err(KernelError::InvalidInput {
            what: "rated power must be positive",
        });
    }
    let hours_per_year = check_hours(operating_hours_per_year)?;
    let tariff = ensure_non_negative(tariff_rate_per_kwh, "tariff rate")?;

    let efficiency_gap = (benchmark_efficiency - combined_efficiency).max(0.0);
    let wasted: Energy = kw(rated_power_kw) * hours(hours_per_year) * efficiency_gap;
    let wasted_energy_kwh = to_kwh(wasted);

    Ok(FinancialImpact {
        efficiency_gap,
        operating_hours_per_year: hours_per_year,
        wasted_energy_kwh,
        cost: Money::new(wasted_energy_kwh * tariff, currency.clone()),
        tariff_rate_per_kwh: tariff,
    })
}

/// Total yearly energy, cost and emissions at the measured input power.
pub fn estimate_operating_cost(
    input_power_kw: f64,
    operating_hours_per_year: f64,
    tariff_rate_per_kwh: f64,
    currency: &CurrencyCode,
    co2_kg_per_kwh: f64,
) -> KernelResult<OperatingCost> {
    let input = ensure_non_negative(input_power_kw, "input power")?;
    let hours_per_year = check_hours(operating_hours_per_year)?;
    let tariff = ensure_non_negative(tariff_rate_per_kwh, "tariff rate")?;
    let co2 = ensure_non_negative(co2_kg_per_kwh, "emission factor")?;

    let energy: Energy = kw(input) * hours(hours_per_year);
    let energy_kwh = to_kwh(energy);

    Ok(OperatingCost {
        energy_kwh,
        cost: Money::new(energy_kwh * tariff, currency.clone()),
        co2_tonnes: energy_kwh * co2 / 1000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tzs() -> CurrencyCode {
        CurrencyCode::new("TZS").unwrap()
    }

    #[test]
    fn currency_code_validation() {
        assert!(CurrencyCode::new("USD").is_ok());
        assert_eq!(CurrencyCode::new(" kes ").ok(), None);
        assert!(CurrencyCode::new("EURO").is_err());
        assert!(serde_yaml::from_str::<CurrencyCode>("usd").is_err());
    }

    #[test]
    fn wasted_energy_formula() {
        let f = estimate(0.50, 0.69, 30.0, 8000.0, 280.0, &tzs()).unwrap();
        assert!((f.efficiency_gap - 0.19).abs() < 1e-12);
        assert!((f.wasted_energy_kwh - 30.0 * 8000.0 * 0.19).abs() < 1e-6);
        assert!((f.cost.amount - f.wasted_energy_kwh * 280.0).abs() < 1e-6);
        assert_eq!(f.currency(), &tzs());
    }

    #[test]
    fn zero_hours_costs_nothing() {
        let f = estimate(0.2, 0.69, 30.0, 0.0, 280.0, &tzs()).unwrap();
        assert_eq!(f.wasted_energy_kwh, 0.0);
        assert_eq!(f.cost.amount, 0.0);
    }

    #[test]
    fn better_than_benchmark_costs_nothing() {
        let f = estimate(0.75, 0.69, 30.0, 8760.0, 0.15, &tzs()).unwrap();
        assert_eq!(f.efficiency_gap, 0.0);
        assert_eq!(f.cost.amount, 0.0);
    }

    #[test]
    fn rejects_bad_tariff_and_hours() {
        assert!(estimate(0.5, 0.69, 30.0, 8000.0, -1.0, &tzs()).is_err());
        assert!(estimate(0.5, 0.69, 30.0, -5.0, 1.0, &tzs()).is_err());
        assert!(estimate(0.5, 0.69, 30.0, 9000.0, 1.0, &tzs()).is_err());
        assert!(estimate(0.5, 0.69, 0.0, 8000.0, 1.0, &tzs()).is_err());
    }

    #[test]
    fn operating_cost_and_carbon() {
        let c = estimate_operating_cost(33.6, 720.0, 280.0, &tzs(), 0.4).unwrap();
        assert!((c.energy_kwh - 33.6 * 720.0).abs() < 1e-6);
        assert!((c.cost.amount - 33.6 * 720.0 * 280.0).abs() < 1e-3);
        assert!((c.co2_tonnes - 33.6 * 720.0 * 0.4 / 1000.0).abs() < 1e-9);
    }

    #[test]
    fn money_display() {
        let m = Money::new(1234.5, tzs());
        assert_eq!(m.to_string(), "TZS 1234.50");
    }
}
