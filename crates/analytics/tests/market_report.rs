//! End-to-end checks of the analytics engine over a decoded upstream payload.

use analytics::{AnalyticsEngine, EngineOptions, Measure};
use chrono::{TimeZone, Utc};
use core_types::{parse_payload, OutlierSelection, PropertyRecord};
use serde_json::json;

// ==================== Helper Functions ====================

fn suburb_listings() -> Vec<PropertyRecord> {
    let payload = json!({
        "results": [
            {
                "address": "1 Banksia Cres",
                "price": 820000,
                "attributes": { "bedrooms": 3, "bathrooms": 2, "garage_spaces": 1, "land_size": "612 m²" },
                "property_type": "House",
                "listing_date": "2025-05-29"
            },
            {
                "address": "4/18 Ocean Pde",
                "price": 560000,
                "attributes": { "bedrooms": 2, "bathrooms": 1, "garage_spaces": 1, "land_size": null },
                "property_type": "Unit",
                "listing_date": "2025-04-01"
            },
            {
                "address": "9 Wattle St",
                "price": 905000,
                "attributes": { "bedrooms": 4, "bathrooms": 2, "garage_spaces": 2, "land_size": 745 },
                "property_type": "House",
                "listing_date": "2025-05-20"
            },
            {
                "address": "22 Ridge Rd",
                "price": null,
                "attributes": { "bedrooms": 3, "bathrooms": 1, "land_size": "see agent" },
                "property_type": "Townhouse",
                "listing_date": null
            },
            {
                "address": "The Estate",
                "price": 4850000,
                "attributes": { "bedrooms": 6, "bathrooms": 5, "garage_spaces": 4, "land_size": "1.2ha" },
                "property_type": "House",
                "listing_date": "2025-02-11"
            },
            {
                "address": "3 Fig Tree Ln",
                "price": 760000,
                "attributes": { "bedrooms": 3, "bathrooms": 2, "garage_spaces": 1, "land_size": "520m2" },
                "property_type": "Townhouse",
                "listing_date": "2025-05-30"
            }
        ]
    });
    parse_payload(payload).unwrap()
}

fn reference_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

// ==================== Tests ====================

#[test]
fn report_summarises_the_priced_listings() {
    let records = suburb_listings();
    let report = AnalyticsEngine::default().analyze(&records, reference_time());

    assert_eq!(report.listing_count, 6);
    assert_eq!(report.priced_count, 5);
    assert_eq!(report.prices.count, 5);
    assert_eq!(report.prices.median, 820_000.0);
    assert_eq!(report.prices.min, 560_000.0);
    assert_eq!(report.prices.max, 4_850_000.0);
    assert!(matches!(report.prices.skewness, Measure::Value(s) if s > 0.0));

    assert_eq!(report.type_breakdown["House"], 3);
    assert_eq!(report.type_breakdown["Townhouse"], 2);
    assert_eq!(report.type_breakdown["Unit"], 1);

    // 612, 745, 12_000 and 520 square metres.
    assert_eq!(report.land_area.count, 4);
    assert_eq!(report.price_per_square_metre.count, 4);
}

#[test]
fn the_estate_is_flagged_as_overpriced() {
    let records = suburb_listings();
    let report = AnalyticsEngine::default().analyze(&records, reference_time());

    let overpriced = report.outliers.overpriced.as_ref().unwrap();
    assert_eq!(records[overpriced.index].display_name(), "The Estate");
    assert!(overpriced.percent_from_mean > 0.0);
    assert!(report.outliers.undervalued.is_none());
    assert_eq!(report.outliers.market_median, report.prices.median);
}

#[test]
fn top_picks_are_ranked_and_limited() {
    let records = suburb_listings();
    let engine = AnalyticsEngine::new(EngineOptions {
        top_picks: 3,
        outlier_selection: OutlierSelection::MostExtreme,
    });
    let report = engine.analyze(&records, reference_time());

    assert_eq!(report.top_picks.len(), 3);
    assert!(
        report
            .top_picks
            .windows(2)
            .all(|w| w[0].score.total >= w[1].score.total)
    );
    // 9 Wattle St: price 15, land 20, features 25, house 15, listed 12 days ago 7.
    assert_eq!(records[report.top_picks[0].index].display_name(), "9 Wattle St");
    assert_eq!(report.top_picks[0].score.total, 82);

    let all = engine.rank(&records, reference_time());
    assert_eq!(all.len(), records.len());
    assert!(all.iter().all(|s| s.score.total <= 100));
}

#[test]
fn analysis_is_idempotent() {
    let records = suburb_listings();
    let engine = AnalyticsEngine::default();
    let first = engine.analyze(&records, reference_time());
    let second = engine.analyze(&records, reference_time());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn empty_result_sets_yield_a_zeroed_report() {
    let report = AnalyticsEngine::default().analyze(&[], reference_time());
    assert_eq!(report.listing_count, 0);
    assert_eq!(report.prices.mean, 0.0);
    assert!(report.top_picks.is_empty());
    assert!(report.outliers.overpriced.is_none());
}
