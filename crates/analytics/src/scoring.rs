//! The investment score: a 0-100 heuristic built from five capped factors.
//!
//! | factor   | max | basis                                    |
//! |----------|-----|------------------------------------------|
//! | price    | 30  | asking price relative to the median      |
//! | land     | 20  | land area in square metres               |
//! | features | 25  | bedrooms, bathrooms and garage spaces    |
//! | type     | 15  | house, townhouse or anything else        |
//! | recency  | 10  | days since the listing date              |

use crate::statistics::{median, positive_sample};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use core_types::{Attributes, PropertyRecord, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_SCORE: u8 = 100;

/// The per-factor points behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub price: f64,
    pub land: f64,
    pub features: f64,
    #[serde(rename = "type")]
    pub property_type: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.price + self.land + self.features + self.property_type + self.recency
    }

    /// The breakdown keyed by factor name.
    pub fn named(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("price", self.price),
            ("land", self.land),
            ("features", self.features),
            ("type", self.property_type),
            ("recency", self.recency),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentScore {
    pub total: u8,
    pub breakdown: ScoreBreakdown,
}

/// A score attached to the position of its record in the analysed list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredProperty {
    pub index: usize,
    pub score: InvestmentScore,
}

/// The reference values every record in one result set is scored against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringContext {
    pub median_price: f64,
    pub now: DateTime<Utc>,
}

impl ScoringContext {
    pub fn new(median_price: f64, now: DateTime<Utc>) -> Self {
        Self { median_price, now }
    }

    /// Uses the median of the listed prices in `records`.
    pub fn from_records(records: &[PropertyRecord], now: DateTime<Utc>) -> Self {
        let prices = positive_sample(records.iter().map(PropertyRecord::listed_price));
        Self::new(median(&prices), now)
    }
}

/// Price relative to the median: under 0.8 scores 30, under 1.0 scores 25,
/// under 1.2 scores 15, anything else 5.
///
/// A listing without a price, or a result set without a median, gets the floor.
pub fn price_factor(price: Option<f64>, median_price: f64) -> f64 {
    let Some(price) = price.filter(|p| *p > 0.0) else {
        return 5.0;
    };
    if median_price <= 0.0 {
        return 5.0;
    }
    let ratio = price / median_price;
    if ratio < 0.8 {
        30.0
    } else if ratio < 1.0 {
        25.0
    } else if ratio < 1.2 {
        15.0
    } else {
        5.0
    }
}

pub fn land_factor(area_sqm: Option<f64>) -> f64 {
    let area = area_sqm.unwrap_or(0.0);
    if area > 700.0 {
        20.0
    } else if area > 600.0 {
        15.0
    } else if area > 500.0 {
        10.0
    } else {
        5.0
    }
}

pub fn features_factor(attributes: &Attributes) -> f64 {
    let bedrooms = attributes.bedrooms.unwrap_or(0.0);
    let bathrooms = attributes.bathrooms.unwrap_or(0.0);
    let garages = attributes.garage_spaces.unwrap_or(0.0);
    (bedrooms * 5.0 + bathrooms * 4.0 + garages * 3.0).min(25.0)
}

pub fn type_factor(property_type: &PropertyType) -> f64 {
    match property_type {
        PropertyType::House => 15.0,
        PropertyType::Townhouse => 10.0,
        _ => 5.0,
    }
}

/// Fewer than 7 days on market scores 10, fewer than 30 scores 7, older listings 3.
///
/// A listing with no date falls into the oldest bracket.
pub fn recency_factor(listing_date: Option<NaiveDate>, now: DateTime<Utc>) -> f64 {
    let Some(listed) = listing_date else {
        return 3.0;
    };
    let listed_at = listed.and_time(NaiveTime::MIN).and_utc();
    let days = (now - listed_at).num_seconds() as f64 / 86_400.0;
    if days < 7.0 {
        10.0
    } else if days < 30.0 {
        7.0
    } else {
        3.0
    }
}

pub fn score_property(record: &PropertyRecord, context: &ScoringContext) -> InvestmentScore {
    let breakdown = ScoreBreakdown {
        price: price_factor(record.listed_price(), context.median_price),
        land: land_factor(record.land_area()),
        features: features_factor(&record.attributes),
        property_type: type_factor(&record.property_type),
        recency: recency_factor(record.listing_date, context.now),
    };
    let total = breakdown.sum().round().clamp(0.0, f64::from(MAX_SCORE)) as u8;
    InvestmentScore { total, breakdown }
}

/// Scores every record and orders them best first. Ties keep list order.
pub fn rank_by_score(records: &[PropertyRecord], context: &ScoringContext) -> Vec<ScoredProperty> {
    let mut ranked: Vec<ScoredProperty> = records
        .iter()
        .enumerate()
        .map(|(index, record)| ScoredProperty {
            index,
            score: score_property(record, context),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total.cmp(&a.score.total));
    ranked
}

pub fn top_picks(
    records: &[PropertyRecord],
    context: &ScoringContext,
    limit: usize,
) -> Vec<ScoredProperty> {
    let mut ranked = rank_by_score(records, context);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use core_types::LandSize;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn listed_days_ago(days: i64) -> Option<NaiveDate> {
        Some((now() - Duration::days(days)).date_naive())
    }

    #[test]
    fn bare_overpriced_land_scores_the_floor() {
        let record = PropertyRecord {
            price: Some(dec!(1000000)),
            attributes: Attributes {
                bedrooms: Some(0.0),
                bathrooms: Some(0.0),
                garage_spaces: Some(0.0),
                ..Default::default()
            },
            property_type: PropertyType::Land,
            listing_date: listed_days_ago(365),
            ..Default::default()
        };
        let context = ScoringContext::new(500_000.0, now());
        let score = score_property(&record, &context);

        assert_eq!(score.breakdown.price, 5.0);
        assert_eq!(score.breakdown.land, 5.0);
        assert_eq!(score.breakdown.features, 0.0);
        assert_eq!(score.breakdown.property_type, 5.0);
        assert_eq!(score.breakdown.recency, 3.0);
        assert_eq!(score.total, 18);
    }

    #[test]
    fn well_rounded_house_scores_the_maximum() {
        let record = PropertyRecord {
            price: Some(dec!(700000)),
            attributes: Attributes {
                bedrooms: Some(4.0),
                bathrooms: Some(2.0),
                garage_spaces: Some(2.0),
                land_size: LandSize::Area(810.0),
                description: None,
            },
            property_type: PropertyType::House,
            listing_date: listed_days_ago(2),
            ..Default::default()
        };
        let score = score_property(&record, &ScoringContext::new(1_000_000.0, now()));
        assert_eq!(score.total, MAX_SCORE);
        assert_eq!(score.breakdown.named()["features"], 25.0);
    }

    #[test]
    fn price_brackets() {
        assert_eq!(price_factor(Some(79.0), 100.0), 30.0);
        assert_eq!(price_factor(Some(80.0), 100.0), 25.0);
        assert_eq!(price_factor(Some(100.0), 100.0), 15.0);
        assert_eq!(price_factor(Some(119.0), 100.0), 15.0);
        assert_eq!(price_factor(Some(120.0), 100.0), 5.0);
        assert_eq!(price_factor(None, 100.0), 5.0);
        assert_eq!(price_factor(Some(100.0), 0.0), 5.0);
    }

    #[test]
    fn land_brackets() {
        assert_eq!(land_factor(Some(701.0)), 20.0);
        assert_eq!(land_factor(Some(700.0)), 15.0);
        assert_eq!(land_factor(Some(600.5)), 15.0);
        assert_eq!(land_factor(Some(550.0)), 10.0);
        assert_eq!(land_factor(Some(500.0)), 5.0);
        assert_eq!(land_factor(None), 5.0);
    }

    #[test]
    fn recency_brackets() {
        assert_eq!(recency_factor(listed_days_ago(0), now()), 10.0);
        assert_eq!(recency_factor(listed_days_ago(10), now()), 7.0);
        assert_eq!(recency_factor(listed_days_ago(45), now()), 3.0);
        assert_eq!(recency_factor(None, now()), 3.0);
    }

    #[test]
    fn fractional_bathrooms_round_the_total() {
        let record = PropertyRecord {
            attributes: Attributes {
                bedrooms: Some(1.0),
                bathrooms: Some(1.5),
                ..Default::default()
            },
            ..Default::default()
        };
        // 5 + 5 + 11 + 5 + 3
        let score = score_property(&record, &ScoringContext::new(0.0, now()));
        assert_eq!(score.breakdown.features, 11.0);
        assert_eq!(score.total, 29);
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let unit = PropertyRecord {
            property_type: PropertyType::Unit,
            ..Default::default()
        };
        let house = PropertyRecord {
            property_type: PropertyType::House,
            ..Default::default()
        };
        let records = vec![unit.clone(), house, unit.clone(), unit];
        let context = ScoringContext::new(0.0, now());

        let order: Vec<usize> = rank_by_score(&records, &context)
            .iter()
            .map(|s| s.index)
            .collect();
        assert_eq!(order, vec![1, 0, 2, 3]);

        let picks = top_picks(&records, &context, 2);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[1].index, 0);
    }

    #[test]
    fn context_uses_the_median_listed_price() {
        let priced = |p| PropertyRecord {
            price: Some(p),
            ..Default::default()
        };
        let records = vec![
            priced(dec!(300000)),
            PropertyRecord::default(),
            priced(dec!(500000)),
            priced(dec!(400000)),
        ];
        let context = ScoringContext::from_records(&records, now());
        assert_eq!(context.median_price, 400_000.0);
    }
}
