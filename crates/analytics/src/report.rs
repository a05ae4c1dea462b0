use crate::outliers::OutlierReport;
use crate::scoring::ScoredProperty;
use crate::statistics::SampleStatistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A market overview of one result set.
///
/// This struct is the final output of the `AnalyticsEngine` and is what the
/// web server and the CLI hand to their presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    // I. Coverage
    pub listing_count: usize,
    pub priced_count: usize,

    // II. Sample summaries (non-positive and absent values excluded)
    pub prices: SampleStatistics,
    pub price_per_square_metre: SampleStatistics,
    pub land_area: SampleStatistics,
    pub bedrooms: SampleStatistics,
    pub bathrooms: SampleStatistics,
    pub garages: SampleStatistics,

    // III. Composition
    pub type_breakdown: BTreeMap<String, usize>,

    // IV. Pricing anomalies and ranking
    pub outliers: OutlierReport,
    pub top_picks: Vec<ScoredProperty>,

    /// The reference time used for listing recency.
    pub generated_at: DateTime<Utc>,
}

impl MarketReport {
    /// Creates an empty report for a result set with no listings.
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            listing_count: 0,
            priced_count: 0,
            prices: SampleStatistics::empty(),
            price_per_square_metre: SampleStatistics::empty(),
            land_area: SampleStatistics::empty(),
            bedrooms: SampleStatistics::empty(),
            bathrooms: SampleStatistics::empty(),
            garages: SampleStatistics::empty(),
            type_breakdown: BTreeMap::new(),
            outliers: OutlierReport::default(),
            top_picks: Vec::new(),
            generated_at,
        }
    }
}
