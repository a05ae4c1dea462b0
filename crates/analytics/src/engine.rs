use crate::outliers::detect_price_outliers;
use crate::report::MarketReport;
use crate::scoring::{rank_by_score, ScoredProperty, ScoringContext};
use crate::statistics::SampleStatistics;
use chrono::{DateTime, Utc};
use core_types::{OutlierSelection, PropertyRecord};
use serde::{Deserialize, Serialize};

/// Tunables for a market analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// How many of the best-scored listings the report carries.
    pub top_picks: usize,
    pub outlier_selection: OutlierSelection,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            top_picks: 5,
            outlier_selection: OutlierSelection::FirstMatch,
        }
    }
}

/// A stateless calculator for deriving market metrics from a list of listings.
#[derive(Debug, Default, Clone)]
pub struct AnalyticsEngine {
    options: EngineOptions,
}

impl AnalyticsEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The main entry point for analysing a result set.
    ///
    /// # Arguments
    ///
    /// * `records` - Every listing in the current result set, in display order.
    /// * `now` - The reference time for listing recency.
    ///
    /// # Returns
    ///
    /// A `MarketReport`. Analysis never fails: an empty or unpriced result set
    /// yields a zeroed report.
    pub fn analyze(&self, records: &[PropertyRecord], now: DateTime<Utc>) -> MarketReport {
        let mut report = MarketReport::new(now);

        if records.is_empty() {
            return report;
        }

        self.summarise_samples(records, &mut report);
        self.summarise_composition(records, &mut report);
        report.outliers = detect_price_outliers(records, self.options.outlier_selection);
        report.top_picks = self.top_picks(records, now);

        tracing::debug!(
            listings = report.listing_count,
            priced = report.priced_count,
            median_price = report.prices.median,
            "Market analysis complete."
        );
        report
    }

    /// Every listing scored against this result set, best first.
    pub fn rank(&self, records: &[PropertyRecord], now: DateTime<Utc>) -> Vec<ScoredProperty> {
        let context = ScoringContext::from_records(records, now);
        rank_by_score(records, &context)
    }

    fn top_picks(&self, records: &[PropertyRecord], now: DateTime<Utc>) -> Vec<ScoredProperty> {
        let mut ranked = self.rank(records, now);
        ranked.truncate(self.options.top_picks);
        ranked
    }

    /// Calculates the per-field sample summaries.
    fn summarise_samples(&self, records: &[PropertyRecord], report: &mut MarketReport) {
        report.listing_count = records.len();
        report.priced_count = records.iter().filter_map(PropertyRecord::listed_price).count();

        let sample = |field: fn(&PropertyRecord) -> Option<f64>| {
            SampleStatistics::compute(records.iter().filter_map(field))
        };
        report.prices = sample(PropertyRecord::listed_price);
        report.price_per_square_metre = sample(PropertyRecord::price_per_square_metre);
        report.land_area = sample(PropertyRecord::land_area);
        report.bedrooms = sample(|r| r.attributes.bedrooms);
        report.bathrooms = sample(|r| r.attributes.bathrooms);
        report.garages = sample(|r| r.attributes.garage_spaces);
    }

    /// Counts listings per property type.
    fn summarise_composition(&self, records: &[PropertyRecord], report: &mut MarketReport) {
        for record in records {
            *report
                .type_breakdown
                .entry(record.property_type.label().to_string())
                .or_default() += 1;
        }
    }
}
