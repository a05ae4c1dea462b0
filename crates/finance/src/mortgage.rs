use crate::error::FinanceError;
use crate::{div, ensure_non_negative, growth_factor, monthly_rate, mul, MONTHS_PER_YEAR};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for a fixed-rate, fully amortising home loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageParams {
    pub price: Decimal,
    pub deposit: Decimal,
    /// Annual interest rate in percent.
    pub annual_rate_pct: Decimal,
    pub term_years: u32,
}

impl MortgageParams {
    pub fn loan_amount(&self) -> Decimal {
        self.price - self.deposit
    }

    fn validate(&self) -> Result<(), FinanceError> {
        ensure_non_negative("price", self.price)?;
        ensure_non_negative("deposit", self.deposit)?;
        ensure_non_negative("annual_rate_pct", self.annual_rate_pct)?;
        if self.deposit > self.price {
            return Err(FinanceError::InvalidParameters(format!(
                "deposit ({}) exceeds the price ({})",
                self.deposit, self.price
            )));
        }
        if self.term_years == 0 {
            return Err(FinanceError::InvalidParameters(
                "term_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageRepayment {
    pub loan_amount: Decimal,
    pub payment_count: u32,
    pub monthly_payment: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
}

/// Calculates the level monthly payment and lifetime cost of a loan.
///
/// With `r` the monthly rate and `n` the number of payments, the payment is
/// `P·r(1+r)^n / ((1+r)^n − 1)`, or simply `P / n` for an interest-free loan.
pub fn mortgage_repayment(params: &MortgageParams) -> Result<MortgageRepayment, FinanceError> {
    params.validate()?;

    // Validated: 0 <= deposit <= price, so this cannot overflow.
    let principal = params.loan_amount();
    let payment_count = params
        .term_years
        .checked_mul(12)
        .ok_or_else(|| FinanceError::InvalidParameters("term_years is too large".to_string()))?;
    let n = Decimal::from(payment_count);
    let r = monthly_rate(params.annual_rate_pct);

    let monthly_payment = if r.is_zero() {
        div(principal, n)?
    } else {
        let growth = growth_factor(r, payment_count)?;
        div(mul(mul(principal, r)?, growth)?, growth - Decimal::ONE)?
    };
    let total_repayment = mul(monthly_payment, n)?;

    tracing::debug!(%principal, %monthly_payment, payments = payment_count, "Amortised loan.");

    Ok(MortgageRepayment {
        loan_amount: principal,
        payment_count,
        monthly_payment,
        total_repayment,
        total_interest: total_repayment - principal,
    })
}

/// Annual cost of a monthly payment.
pub fn annualise(monthly_payment: Decimal) -> Result<Decimal, FinanceError> {
    mul(monthly_payment, MONTHS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn twenty_percent_down() -> MortgageParams {
        MortgageParams {
            price: dec!(1000000),
            deposit: dec!(200000),
            annual_rate_pct: dec!(6),
            term_years: 30,
        }
    }

    #[test]
    fn standard_thirty_year_loan() {
        let repayment = mortgage_repayment(&twenty_percent_down()).unwrap();
        assert_eq!(repayment.loan_amount, dec!(800000));
        assert_eq!(repayment.payment_count, 360);
        assert_eq!(repayment.monthly_payment.round_dp(2), dec!(4796.40));
    }

    #[test]
    fn repayment_minus_interest_is_the_loan() {
        let repayment = mortgage_repayment(&twenty_percent_down()).unwrap();
        let principal = repayment.monthly_payment * dec!(360) - repayment.total_interest;
        assert!((principal - dec!(800000)).abs() < dec!(0.000001));
    }

    #[test]
    fn interest_free_loans_divide_evenly() {
        let params = MortgageParams {
            annual_rate_pct: Decimal::ZERO,
            ..twenty_percent_down()
        };
        let repayment = mortgage_repayment(&params).unwrap();
        assert_eq!(repayment.monthly_payment.round_dp(6), dec!(2222.222222));
        assert_eq!(repayment.total_interest.round_dp(6), Decimal::ZERO);
    }

    #[test]
    fn rejects_degenerate_terms() {
        let zero_term = MortgageParams {
            term_years: 0,
            ..twenty_percent_down()
        };
        assert!(matches!(
            mortgage_repayment(&zero_term),
            Err(FinanceError::InvalidParameters(_))
        ));

        let oversized_deposit = MortgageParams {
            deposit: dec!(1200000),
            ..twenty_percent_down()
        };
        assert!(mortgage_repayment(&oversized_deposit).is_err());
    }

    #[test]
    fn annualised_payment() {
        assert_eq!(annualise(dec!(2500)).unwrap(), dec!(30000));
    }

    #[test]
    fn extreme_rates_fail_instead_of_overflowing() {
        let params = MortgageParams {
            annual_rate_pct: dec!(200),
            ..twenty_percent_down()
        };
        assert!(matches!(
            mortgage_repayment(&params),
            Err(FinanceError::Calculation(_))
        ));
    }
}
