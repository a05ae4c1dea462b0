use crate::error::FinanceError;
use crate::{
    add, div, ensure_non_negative, growth_factor, monthly_rate, mul, sub, MONTHS_PER_YEAR,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Share of gross income a lender assumes can go to repayments.
pub const REPAYMENT_INCOME_SHARE: Decimal = dec!(0.3);
/// Share of living expenses counted against repayment capacity.
pub const EXPENSE_LOADING: Decimal = dec!(0.5);
/// Rate the borrowing capacity is assessed at, in percent.
pub const ASSESSMENT_RATE_PCT: Decimal = dec!(6.5);
pub const ASSESSMENT_TERM_YEARS: u32 = 30;
/// A target at or under this share of the maximum price is comfortable.
pub const COMFORTABLE_SHARE: Decimal = dec!(0.8);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityParams {
    pub annual_household_income: Decimal,
    pub monthly_debts: Decimal,
    pub monthly_expenses: Decimal,
    pub available_deposit: Decimal,
    pub target_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Comfortable,
    Marginal,
    OutOfReach { shortfall: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub monthly_repayment_capacity: Decimal,
    pub available_for_loan: Decimal,
    pub max_borrowing: Decimal,
    pub max_property_price: Decimal,
    pub verdict: Verdict,
}

/// Estimates the most a household can pay and grades a target price against it.
///
/// Monthly capacity is 30 % of gross income, less existing debts and half of
/// living expenses. That repayment is turned into a loan size with the annuity
/// formula at the assessment rate and term; the deposit is added on top.
/// Commitments beyond the capacity are not clamped: they yield a negative
/// borrowing figure that eats into the deposit.
pub fn assess_affordability(
    params: &AffordabilityParams,
) -> Result<AffordabilityAssessment, FinanceError> {
    ensure_non_negative("annual_household_income", params.annual_household_income)?;
    ensure_non_negative("monthly_debts", params.monthly_debts)?;
    ensure_non_negative("monthly_expenses", params.monthly_expenses)?;
    ensure_non_negative("available_deposit", params.available_deposit)?;
    if params.target_price <= Decimal::ZERO {
        return Err(FinanceError::InvalidParameters(format!(
            "target_price must be positive (got {})",
            params.target_price
        )));
    }

    let monthly_repayment_capacity = div(
        mul(params.annual_household_income, REPAYMENT_INCOME_SHARE)?,
        MONTHS_PER_YEAR,
    )?;
    let available_for_loan = sub(
        sub(monthly_repayment_capacity, params.monthly_debts)?,
        mul(params.monthly_expenses, EXPENSE_LOADING)?,
    )?;

    let max_borrowing = mul(available_for_loan, annuity_factor()?)?;
    let max_property_price = add(max_borrowing, params.available_deposit)?;

    let verdict = if params.target_price <= mul(max_property_price, COMFORTABLE_SHARE)? {
        Verdict::Comfortable
    } else if params.target_price <= max_property_price {
        Verdict::Marginal
    } else {
        Verdict::OutOfReach {
            shortfall: sub(params.target_price, max_property_price)?,
        }
    };

    tracing::debug!(%max_borrowing, %max_property_price, ?verdict, "Assessed affordability.");

    Ok(AffordabilityAssessment {
        monthly_repayment_capacity,
        available_for_loan,
        max_borrowing,
        max_property_price,
        verdict,
    })
}

/// Present value of one unit paid monthly at the assessment rate and term:
/// `((1+r)^n − 1) / (r·(1+r)^n)`.
fn annuity_factor() -> Result<Decimal, FinanceError> {
    let r = monthly_rate(ASSESSMENT_RATE_PCT);
    let n = ASSESSMENT_TERM_YEARS * 12;
    let growth = growth_factor(r, n)?;
    Ok((growth - Decimal::ONE) / (r * growth))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(target_price: Decimal) -> AffordabilityParams {
        AffordabilityParams {
            annual_household_income: dec!(120000),
            monthly_debts: dec!(500),
            monthly_expenses: dec!(2000),
            available_deposit: dec!(100000),
            target_price,
        }
    }

    fn near(actual: Decimal, expected: Decimal) -> bool {
        (actual - expected).abs() < dec!(0.01)
    }

    #[test]
    fn capacity_follows_the_income_rules() {
        let assessment = assess_affordability(&household(dec!(250000))).unwrap();
        assert_eq!(assessment.monthly_repayment_capacity, dec!(3000));
        assert_eq!(assessment.available_for_loan, dec!(1500));
        assert!(near(assessment.max_borrowing, dec!(237316.23)));
        assert!(near(assessment.max_property_price, dec!(337316.23)));
    }

    #[test]
    fn verdict_thresholds() {
        let comfortable = assess_affordability(&household(dec!(250000))).unwrap();
        assert_eq!(comfortable.verdict, Verdict::Comfortable);

        let marginal = assess_affordability(&household(dec!(300000))).unwrap();
        assert_eq!(marginal.verdict, Verdict::Marginal);

        let stretch = assess_affordability(&household(dec!(400000))).unwrap();
        match stretch.verdict {
            Verdict::OutOfReach { shortfall } => assert!(near(shortfall, dec!(62683.77))),
            other => panic!("expected out of reach, got {other:?}"),
        }
    }

    #[test]
    fn overcommitted_households_borrow_a_negative_amount() {
        let params = AffordabilityParams {
            monthly_debts: dec!(4000),
            ..household(dec!(90000))
        };
        let assessment = assess_affordability(&params).unwrap();
        assert_eq!(assessment.available_for_loan, dec!(-2000));
        assert!((assessment.max_borrowing - dec!(-316421.64)).abs() < Decimal::ONE);
        assert!((assessment.max_property_price - dec!(-216421.64)).abs() < Decimal::ONE);
        match assessment.verdict {
            Verdict::OutOfReach { shortfall } => {
                assert!((shortfall - dec!(306421.64)).abs() < Decimal::ONE)
            }
            other => panic!("expected out of reach, got {other:?}"),
        }
    }

    #[test]
    fn huge_incomes_are_a_calculation_error() {
        let params = AffordabilityParams {
            annual_household_income: Decimal::MAX,
            ..household(dec!(250000))
        };
        assert!(matches!(assess_affordability(&params), Err(FinanceError::Calculation(_))));
    }

    #[test]
    fn verdict_serializes_with_a_tag() {
        let json = serde_json::to_value(Verdict::Comfortable).unwrap();
        assert_eq!(json["verdict"], "comfortable");
    }
}
