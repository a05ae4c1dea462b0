use crate::error::FinanceError;
use crate::{add, div, ensure_non_negative, growth_factor, mul, sub};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const WEEKS_PER_YEAR: Decimal = dec!(52);

/// The three market outlooks an ROI projection is run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Optimistic,
    Realistic,
    Conservative,
}

impl Scenario {
    pub const ALL: [Scenario; 3] =
        [Scenario::Optimistic, Scenario::Realistic, Scenario::Conservative];

    /// Applied uniformly to both the appreciation rate and the rental yield.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Scenario::Optimistic => dec!(1.3),
            Scenario::Realistic => Decimal::ONE,
            Scenario::Conservative => dec!(0.7),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiParams {
    pub price: Decimal,
    /// Expected capital growth in percent per year.
    pub annual_appreciation_pct: Decimal,
    /// Gross rent as a percentage of the price per year.
    pub rental_yield_pct: Decimal,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: Scenario,
    /// The adjusted yearly appreciation as a fraction.
    pub appreciation_rate: Decimal,
    /// The adjusted yearly rental yield as a fraction.
    pub rental_yield: Decimal,
    pub future_value: Decimal,
    pub capital_gain: Decimal,
    pub total_rental_income: Decimal,
    pub total_return: Decimal,
    pub roi_pct: Decimal,
}

/// Projects a holding under one scenario.
///
/// Capital grows with compounding; rent is simple income on the purchase
/// price, `price · yield · years`.
pub fn project_scenario(
    params: &RoiParams,
    scenario: Scenario,
) -> Result<ScenarioProjection, FinanceError> {
    if params.price <= Decimal::ZERO {
        return Err(FinanceError::InvalidParameters(format!(
            "price must be positive (got {})",
            params.price
        )));
    }
    ensure_non_negative("rental_yield_pct", params.rental_yield_pct)?;

    let appreciation_rate = mul(
        params.annual_appreciation_pct / Decimal::ONE_HUNDRED,
        scenario.multiplier(),
    )?;
    let rental_yield = mul(params.rental_yield_pct / Decimal::ONE_HUNDRED, scenario.multiplier())?;
    if appreciation_rate < Decimal::NEGATIVE_ONE {
        return Err(FinanceError::InvalidParameters(format!(
            "annual_appreciation_pct of {} loses more than the whole price",
            params.annual_appreciation_pct
        )));
    }

    let years = Decimal::from(params.years);
    let future_value = mul(params.price, growth_factor(appreciation_rate, params.years)?)?;
    let capital_gain = sub(future_value, params.price)?;
    let total_rental_income = mul(mul(params.price, rental_yield)?, years)?;
    let total_return = add(capital_gain, total_rental_income)?;

    Ok(ScenarioProjection {
        scenario,
        appreciation_rate,
        rental_yield,
        future_value,
        capital_gain,
        total_rental_income,
        total_return,
        roi_pct: mul(div(total_return, params.price)?, Decimal::ONE_HUNDRED)?,
    })
}

/// Projects the optimistic, realistic and conservative scenarios, in that order.
pub fn project_roi(params: &RoiParams) -> Result<Vec<ScenarioProjection>, FinanceError> {
    Scenario::ALL
        .iter()
        .map(|scenario| project_scenario(params, *scenario))
        .collect()
}

/// Annual rent as a percentage of the price.
pub fn gross_rental_yield(weekly_rent: Decimal, price: Decimal) -> Result<Decimal, FinanceError> {
    ensure_non_negative("weekly_rent", weekly_rent)?;
    if price <= Decimal::ZERO {
        return Err(FinanceError::InvalidParameters(format!(
            "price must be positive (got {price})"
        )));
    }
    mul(div(mul(weekly_rent, WEEKS_PER_YEAR)?, price)?, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_year_hold() -> RoiParams {
        RoiParams {
            price: dec!(800000),
            annual_appreciation_pct: dec!(5),
            rental_yield_pct: dec!(4),
            years: 10,
        }
    }

    fn near(actual: Decimal, expected: Decimal) -> bool {
        (actual - expected).abs() < dec!(0.01)
    }

    #[test]
    fn realistic_scenario_matches_the_formula() {
        let realistic = project_scenario(&ten_year_hold(), Scenario::Realistic).unwrap();
        assert_eq!(realistic.appreciation_rate, dec!(0.05));
        assert!(near(realistic.future_value, dec!(1303115.70)));
        assert_eq!(realistic.total_rental_income, dec!(320000));
        assert!(near(realistic.total_return, dec!(823115.70)));
        assert!(near(realistic.roi_pct, dec!(102.89)));
    }

    #[test]
    fn scenarios_scale_both_rates() {
        let projections = project_roi(&ten_year_hold()).unwrap();
        let scenarios: Vec<Scenario> = projections.iter().map(|p| p.scenario).collect();
        assert_eq!(scenarios, Scenario::ALL.to_vec());

        let optimistic = &projections[0];
        assert_eq!(optimistic.appreciation_rate, dec!(0.065));
        assert_eq!(optimistic.rental_yield, dec!(0.052));
        assert!(near(optimistic.roi_pct, dec!(139.71)));

        let conservative = &projections[2];
        assert_eq!(conservative.total_rental_income, dec!(224000));
        assert!(near(conservative.roi_pct, dec!(69.06)));

        assert!(projections.windows(2).all(|w| w[0].roi_pct > w[1].roi_pct));
    }

    #[test]
    fn zero_year_hold_returns_nothing() {
        let params = RoiParams {
            years: 0,
            ..ten_year_hold()
        };
        let realistic = project_scenario(&params, Scenario::Realistic).unwrap();
        assert_eq!(realistic.future_value, params.price);
        assert!(realistic.roi_pct.is_zero());
    }

    #[test]
    fn rejects_an_unpriced_property() {
        let params = RoiParams {
            price: Decimal::ZERO,
            ..ten_year_hold()
        };
        assert!(matches!(project_roi(&params), Err(FinanceError::InvalidParameters(_))));
    }

    #[test]
    fn gross_yield() {
        assert_eq!(gross_rental_yield(dec!(600), dec!(780000)).unwrap(), dec!(4));
        assert!(gross_rental_yield(dec!(600), Decimal::ZERO).is_err());
    }
}
