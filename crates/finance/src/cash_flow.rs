use crate::error::FinanceError;
use crate::mortgage::annualise;
use crate::{add, div, mul, percent_of, sub};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const WEEKS_PER_YEAR: Decimal = dec!(52);
const QUARTERS_PER_YEAR: Decimal = dec!(4);

/// The running costs and income of a rental property.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowParams {
    pub weekly_rent: Decimal,
    pub monthly_mortgage_payment: Decimal,
    pub annual_council_rates: Decimal,
    pub quarterly_strata_fees: Decimal,
    pub annual_insurance: Decimal,
    pub annual_maintenance: Decimal,
    /// Property manager's cut of the rent, in percent.
    pub management_fee_pct: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowStatus {
    Positive,
    Negative,
    Breakeven,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub annual_income: Decimal,
    pub management_fees: Decimal,
    pub annual_expenses: Decimal,
    pub annual_cash_flow: Decimal,
    pub monthly_cash_flow: Decimal,
    pub weekly_cash_flow: Decimal,
    pub status: CashFlowStatus,
}

/// Nets a year of rent against a year of holding costs.
pub fn cash_flow(params: &CashFlowParams) -> Result<CashFlowSummary, FinanceError> {
    let annual_income = mul(params.weekly_rent, WEEKS_PER_YEAR)?;
    let management_fees = percent_of(annual_income, params.management_fee_pct)?;
    let annual_expenses = [
        params.annual_council_rates,
        mul(params.quarterly_strata_fees, QUARTERS_PER_YEAR)?,
        params.annual_insurance,
        params.annual_maintenance,
        management_fees,
    ]
    .into_iter()
    .try_fold(annualise(params.monthly_mortgage_payment)?, add)?;
    let annual_cash_flow = sub(annual_income, annual_expenses)?;

    let status = if annual_cash_flow > Decimal::ZERO {
        CashFlowStatus::Positive
    } else if annual_cash_flow < Decimal::ZERO {
        CashFlowStatus::Negative
    } else {
        CashFlowStatus::Breakeven
    };

    Ok(CashFlowSummary {
        annual_income,
        management_fees,
        annual_expenses,
        annual_cash_flow,
        monthly_cash_flow: div(annual_cash_flow, dec!(12))?,
        weekly_cash_flow: div(annual_cash_flow, WEEKS_PER_YEAR)?,
        status,
    })
}
