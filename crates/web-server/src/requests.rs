//! Request bodies for the calculator endpoints.
//!
//! Optional fields fall back to the configured `FinanceDefaults`.

use configuration::FinanceDefaults;
use finance::{FinanceError, MortgageParams, RoiParams};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct MortgageRequest {
    pub price: Decimal,
    pub deposit: Option<Decimal>,
    pub annual_rate_pct: Option<Decimal>,
    pub term_years: Option<u32>,
}

impl MortgageRequest {
    pub fn resolve(&self, defaults: &FinanceDefaults) -> Result<MortgageParams, FinanceError> {
        let deposit = match self.deposit {
            Some(deposit) => deposit,
            None => self
                .price
                .checked_mul(defaults.deposit_pct)
                .map(|amount| amount / Decimal::ONE_HUNDRED)
                .ok_or_else(|| {
                    FinanceError::Calculation(format!(
                        "a {}% deposit on {} is outside the decimal range",
                        defaults.deposit_pct, self.price
                    ))
                })?,
        };
        Ok(MortgageParams {
            price: self.price,
            deposit,
            annual_rate_pct: self.annual_rate_pct.unwrap_or(defaults.interest_rate_pct),
            term_years: self.term_years.unwrap_or(defaults.term_years),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoiRequest {
    pub price: Decimal,
    pub annual_appreciation_pct: Option<Decimal>,
    pub rental_yield_pct: Option<Decimal>,
    pub years: Option<u32>,
    /// When given, the gross yield from this rent is reported alongside the scenarios.
    pub weekly_rent: Option<Decimal>,
}

impl RoiRequest {
    pub fn resolve(&self, defaults: &FinanceDefaults) -> RoiParams {
        RoiParams {
            price: self.price,
            annual_appreciation_pct: self
                .annual_appreciation_pct
                .unwrap_or(defaults.appreciation_pct),
            rental_yield_pct: self.rental_yield_pct.unwrap_or(defaults.rental_yield_pct),
            years: self.years.unwrap_or(defaults.holding_years),
        }
    }
}
