//! Currency restatement at the application edge.
//!
//! The kernel tags every amount with the tariff currency. Reports that
//! need another currency convert here, with rates supplied by the project.

use pa_kernel::{CurrencyCode, Money};
use pa_project::ExchangeRatesDef;
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeTable {
    report_currency: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeTable {
    pub fn new(report_currency: CurrencyCode, rates: BTreeMap<CurrencyCode, f64>) -> Self {
        Self {
            report_currency,
            rates,
        }
    }

    pub fn from_def(def: &ExchangeRatesDef) -> Self {
        Self::new(def.report_currency.clone(), def.rates.clone())
    }

    pub fn report_currency(&self) -> &CurrencyCode {
        &self.report_currency
    }

    /// Restate `money` in the report currency.
    pub fn convert(&self, money: &Money) -> AppResult<Money> {
        if money.currency == self.report_currency {
            return Ok(money.clone());
        }
        let rate = self
            .rates
            .get(&money.currency)
            .copied()
            .ok_or_else(|| AppError::MissingRate {
                from: money.currency.to_string(),
                to: self.report_currency.to_string(),
            })?;
        Ok(Money::new(money.amount * rate, self.report_currency.clone()))
    }
}
