//! Textbook real-estate investment formulas.
//!
//! Every function here is pure. Money is `Decimal`, rates are annual
//! percentages (`6.5` means 6.5 % a year) converted to monthly fractions
//! internally, and all amounts share one currency unit.
//!
//! Arithmetic on caller-supplied amounts is checked: a result outside the
//! decimal range is a `FinanceError::Calculation`, never a panic.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

pub mod affordability;
pub mod cash_flow;
pub mod error;
pub mod mortgage;
pub mod roi;

pub use affordability::{
    assess_affordability, AffordabilityAssessment, AffordabilityParams, Verdict,
};
pub use cash_flow::{cash_flow, CashFlowParams, CashFlowStatus, CashFlowSummary};
pub use error::FinanceError;
pub use mortgage::{mortgage_repayment, MortgageParams, MortgageRepayment};
pub use roi::{
    gross_rental_yield, project_roi, project_scenario, RoiParams, Scenario, ScenarioProjection,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Converts an annual percentage rate to a monthly fraction.
pub(crate) fn monthly_rate(annual_rate_pct: Decimal) -> Decimal {
    annual_rate_pct / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}

/// `(1 + rate)^periods`.
pub(crate) fn growth_factor(rate: Decimal, periods: u32) -> Result<Decimal, FinanceError> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            FinanceError::Calculation(format!(
                "(1 + {rate})^{periods} overflowed the decimal range"
            ))
        })
}

fn overflow(a: Decimal, op: char, b: Decimal) -> FinanceError {
    FinanceError::Calculation(format!("{a} {op} {b} is outside the decimal range"))
}

pub(crate) fn add(a: Decimal, b: Decimal) -> Result<Decimal, FinanceError> {
    a.checked_add(b).ok_or_else(|| overflow(a, '+', b))
}

pub(crate) fn sub(a: Decimal, b: Decimal) -> Result<Decimal, FinanceError> {
    a.checked_sub(b).ok_or_else(|| overflow(a, '-', b))
}

pub(crate) fn mul(a: Decimal, b: Decimal) -> Result<Decimal, FinanceError> {
    a.checked_mul(b).ok_or_else(|| overflow(a, '*', b))
}

/// Checked division; a zero divisor is also a `Calculation` error.
pub(crate) fn div(a: Decimal, b: Decimal) -> Result<Decimal, FinanceError> {
    a.checked_div(b).ok_or_else(|| overflow(a, '/', b))
}

/// `value · pct / 100`.
pub(crate) fn percent_of(value: Decimal, pct: Decimal) -> Result<Decimal, FinanceError> {
    div(mul(value, pct)?, Decimal::ONE_HUNDRED)
}

pub(crate) fn ensure_non_negative(name: &str, value: Decimal) -> Result<(), FinanceError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(FinanceError::InvalidParameters(format!(
            "{name} must not be negative (got {value})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_helpers_report_overflow() {
        assert!(matches!(mul(Decimal::MAX, dec!(2)), Err(FinanceError::Calculation(_))));
        assert!(matches!(add(Decimal::MAX, Decimal::ONE), Err(FinanceError::Calculation(_))));
        assert!(matches!(div(Decimal::ONE, Decimal::ZERO), Err(FinanceError::Calculation(_))));
        assert_eq!(percent_of(dec!(800000), dec!(20)).unwrap(), dec!(160000));
    }
}
