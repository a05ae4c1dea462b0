//! Table rendering for the CLI.

use analytics::{Measure, SampleStatistics};
use comfy_table::Table;
use core_types::PropertyRecord;
use explorer::{Dashboard, Frame};
use finance::{
    AffordabilityAssessment, CashFlowSummary, MortgageRepayment, ScenarioProjection, Verdict,
};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

fn measure(value: &Measure<f64>) -> String {
    match value {
        Measure::Value(v) => format!("{v:.2}"),
        Measure::NotComputable => "n/a".to_string(),
    }
}

fn stats_row(label: &str, stats: &SampleStatistics) -> Vec<String> {
    vec![
        label.to_string(),
        stats.count.to_string(),
        format!("{:.0}", stats.mean),
        format!("{:.0}", stats.median),
        format!("{:.0}", stats.min),
        format!("{:.0}", stats.max),
        format!("{:.0}", stats.iqr),
        measure(&stats.skewness),
        measure(&stats.coefficient_of_variation),
    ]
}

pub fn market_report(suburb: &str, dashboard: &Dashboard) -> String {
    let report = dashboard.report();
    let visible = dashboard.visible_records();
    let name = |index: usize| visible.get(index).map_or("?", |r| r.display_name());

    let mut stats = Table::new();
    stats.set_header(vec![
        "Metric", "Count", "Mean", "Median", "Min", "Max", "IQR", "Skew", "CV %",
    ]);
    stats.add_row(stats_row("Price", &report.prices));
    stats.add_row(stats_row("Price / m²", &report.price_per_square_metre));
    stats.add_row(stats_row("Land m²", &report.land_area));
    stats.add_row(stats_row("Bedrooms", &report.bedrooms));
    stats.add_row(stats_row("Bathrooms", &report.bathrooms));
    stats.add_row(stats_row("Garages", &report.garages));

    let mut types = Table::new();
    types.set_header(vec!["Type", "Listings"]);
    for (label, count) in &report.type_breakdown {
        types.add_row(vec![label.clone(), count.to_string()]);
    }

    let mut picks = Table::new();
    picks.set_header(vec!["#", "Listing", "Score", "Price", "Land", "Features", "Type", "Recency"]);
    for (rank, pick) in report.top_picks.iter().enumerate() {
        let b = &pick.score.breakdown;
        picks.add_row(vec![
            (rank + 1).to_string(),
            name(pick.index).to_string(),
            pick.score.total.to_string(),
            b.price.to_string(),
            b.land.to_string(),
            b.features.to_string(),
            b.property_type.to_string(),
            b.recency.to_string(),
        ]);
    }

    let outliers = &report.outliers;
    let mut anomalies = Table::new();
    anomalies.set_header(vec!["Flag", "Listing", "Price", "vs mean", "Flagged"]);
    for (label, flag, count) in [
        ("Undervalued", &outliers.undervalued, outliers.undervalued_count),
        ("Overpriced", &outliers.overpriced, outliers.overpriced_count),
    ] {
        match flag {
            Some(flag) => anomalies.add_row(vec![
                label.to_string(),
                name(flag.index).to_string(),
                format!("{:.0}", flag.price),
                format!("{:+.1}%", flag.percent_from_mean),
                count.to_string(),
            ]),
            None => anomalies.add_row(vec![
                label.to_string(),
                "-".into(),
                "-".into(),
                "-".into(),
                "0".into(),
            ]),
        };
    }

    format!(
        "Market report for {suburb}: {} of {} listings shown, {} priced, market median ${:.0}\n\
         (fences {:.0} .. {:.0})\n{stats}\n{types}\n{picks}\n{anomalies}",
        report.listing_count,
        dashboard.records().len(),
        report.priced_count,
        outliers.market_median,
        outliers.lower_fence,
        outliers.upper_fence,
    )
}

pub fn timeline(frames: &[Frame], records: &[PropertyRecord], undated: usize) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Month", "New", "Cumulative", "Median price", "Listings"]);
    for frame in frames {
        let names: Vec<&str> = frame
            .listings
            .iter()
            .filter_map(|&i| records.get(i).map(PropertyRecord::display_name))
            .collect();
        table.add_row(vec![
            frame.month.format("%Y-%m").to_string(),
            frame.new_listings.to_string(),
            frame.cumulative_listings.to_string(),
            frame.median_price.map_or("-".to_string(), |p| format!("{p:.0}")),
            names.join("; "),
        ]);
    }
    format!("{table}\n{undated} listing(s) without a listing date")
}

pub fn mortgage(repayment: &MortgageRepayment) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Loan", "Payments", "Monthly", "Total repaid", "Total interest"]);
    table.add_row(vec![
        money(repayment.loan_amount),
        repayment.payment_count.to_string(),
        money(repayment.monthly_payment),
        money(repayment.total_repayment),
        money(repayment.total_interest),
    ]);
    table.to_string()
}

pub fn roi(scenarios: &[ScenarioProjection], gross_yield: Option<Decimal>) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        "Scenario", "Future value", "Capital gain", "Rental income", "Total return", "ROI %",
    ]);
    for s in scenarios {
        table.add_row(vec![
            format!("{:?}", s.scenario),
            money(s.future_value),
            money(s.capital_gain),
            money(s.total_rental_income),
            money(s.total_return),
            s.roi_pct.round_dp(1).to_string(),
        ]);
    }
    match gross_yield {
        Some(y) => format!("{table}\nGross rental yield: {}%", y.round_dp(2)),
        None => table.to_string(),
    }
}

pub fn cash_flow(summary: &CashFlowSummary) -> String {
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec!["Annual income".to_string(), money(summary.annual_income)]);
    table.add_row(vec!["Management fees".to_string(), money(summary.management_fees)]);
    table.add_row(vec!["Annual expenses".to_string(), money(summary.annual_expenses)]);
    table.add_row(vec!["Annual cash flow".to_string(), money(summary.annual_cash_flow)]);
    table.add_row(vec!["Monthly cash flow".to_string(), money(summary.monthly_cash_flow)]);
    table.add_row(vec!["Weekly cash flow".to_string(), money(summary.weekly_cash_flow)]);
    table.add_row(vec!["Status".to_string(), format!("{:?}", summary.status)]);
    table.to_string()
}

pub fn affordability(assessment: &AffordabilityAssessment) -> String {
    let verdict = match assessment.verdict {
        Verdict::Comfortable => "Comfortable".to_string(),
        Verdict::Marginal => "Marginal".to_string(),
        Verdict::OutOfReach { shortfall } => format!("Out of reach (short {})", money(shortfall)),
    };
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        "Monthly repayment capacity".to_string(),
        money(assessment.monthly_repayment_capacity),
    ]);
    table.add_row(vec!["Available for the loan".to_string(), money(assessment.available_for_loan)]);
    table.add_row(vec!["Maximum borrowing".to_string(), money(assessment.max_borrowing)]);
    table.add_row(vec!["Maximum price".to_string(), money(assessment.max_property_price)]);
    table.add_row(vec!["Verdict".to_string(), verdict]);
    table.to_string()
}
