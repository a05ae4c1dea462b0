use crate::statistics::{mean, median, percentile, positive_sample};
use core_types::{OutlierSelection, PropertyRecord};
use serde::{Deserialize, Serialize};

/// Tukey's fence multiplier.
pub const FENCE_MULTIPLIER: f64 = 1.5;

/// A record whose price lies beyond one of the fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierFlag {
    /// Position of the record in the analysed list.
    pub index: usize,
    pub price: f64,
    /// Distance from the market mean as a percentage of that mean.
    pub percent_from_mean: f64,
}

/// IQR fences over a price sample plus one representative record on each side.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlierReport {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// The figure shown as "the market" price.
    pub market_median: f64,
    /// The figure percentages are measured against.
    pub market_mean: f64,
    pub undervalued: Option<OutlierFlag>,
    pub overpriced: Option<OutlierFlag>,
    pub undervalued_count: usize,
    pub overpriced_count: usize,
}

/// Flags prices strictly outside `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]`.
///
/// `prices` is aligned with the record list; `None` entries (and non-positive
/// prices) take no part in the quartiles and are never flagged.
pub fn detect_outliers(prices: &[Option<f64>], selection: OutlierSelection) -> OutlierReport {
    let sample = positive_sample(prices.iter().copied());
    if sample.is_empty() {
        return OutlierReport::default();
    }

    let q1 = percentile(&sample, 25.0);
    let q3 = percentile(&sample, 75.0);
    let iqr = q3 - q1;
    let lower_fence = q1 - FENCE_MULTIPLIER * iqr;
    let upper_fence = q3 + FENCE_MULTIPLIER * iqr;
    let market_mean = mean(&sample);

    let priced = || {
        prices
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| p.filter(|v| v.is_finite() && *v > 0.0).map(|v| (i, v)))
    };
    let below: Vec<(usize, f64)> = priced().filter(|(_, p)| *p < lower_fence).collect();
    let above: Vec<(usize, f64)> = priced().filter(|(_, p)| *p > upper_fence).collect();

    let (low_pick, high_pick) = match selection {
        OutlierSelection::FirstMatch => (below.first().copied(), above.first().copied()),
        OutlierSelection::MostExtreme => (
            below.iter().copied().reduce(|a, b| if b.1 < a.1 { b } else { a }),
            above.iter().copied().reduce(|a, b| if b.1 > a.1 { b } else { a }),
        ),
    };

    tracing::debug!(
        lower_fence,
        upper_fence,
        below = below.len(),
        above = above.len(),
        "Computed price fences."
    );

    OutlierReport {
        q1,
        q3,
        iqr,
        lower_fence,
        upper_fence,
        market_median: median(&sample),
        market_mean,
        undervalued: low_pick.map(|(index, price)| OutlierFlag {
            index,
            price,
            percent_from_mean: (market_mean - price) / market_mean * 100.0,
        }),
        overpriced: high_pick.map(|(index, price)| OutlierFlag {
            index,
            price,
            percent_from_mean: (price - market_mean) / market_mean * 100.0,
        }),
        undervalued_count: below.len(),
        overpriced_count: above.len(),
    }
}

/// Runs [`detect_outliers`] over the asking prices of `records`.
pub fn detect_price_outliers(
    records: &[PropertyRecord],
    selection: OutlierSelection,
) -> OutlierReport {
    let prices: Vec<Option<f64>> = records.iter().map(PropertyRecord::listed_price).collect();
    detect_outliers(&prices, selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn flags_only_the_far_value() {
        let prices = some(&[100.0, 102.0, 98.0, 101.0, 99.0, 500.0]);
        let report = detect_outliers(&prices, OutlierSelection::FirstMatch);

        assert_eq!(report.q1, 99.25);
        assert_eq!(report.q3, 101.75);
        assert_eq!(report.iqr, 2.5);
        assert_eq!(report.upper_fence, 105.5);
        assert_eq!(report.lower_fence, 95.5);

        let overpriced = report.overpriced.unwrap();
        assert_eq!(overpriced.index, 5);
        assert_eq!(overpriced.price, 500.0);
        assert_eq!(report.overpriced_count, 1);
        assert!(report.undervalued.is_none());
        assert_eq!(report.undervalued_count, 0);
    }

    #[test]
    fn percentages_are_relative_to_the_mean() {
        let prices = some(&[100.0, 102.0, 98.0, 101.0, 99.0, 500.0]);
        let report = detect_outliers(&prices, OutlierSelection::FirstMatch);
        assert_eq!(report.market_mean, 1000.0 / 6.0);
        assert_eq!(report.market_median, 100.5);
        let expected = (500.0 - report.market_mean) / report.market_mean * 100.0;
        assert_eq!(report.overpriced.unwrap().percent_from_mean, expected);
    }

    #[test]
    fn first_match_keeps_list_order() {
        let prices = some(&[
            100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 101.0, 400.0, 900.0, 10.0, 2.0,
        ]);
        let first = detect_outliers(&prices, OutlierSelection::FirstMatch);
        assert_eq!(first.overpriced.as_ref().unwrap().index, 8);
        assert_eq!(first.undervalued.as_ref().unwrap().index, 10);

        let extreme = detect_outliers(&prices, OutlierSelection::MostExtreme);
        assert_eq!(extreme.overpriced.unwrap().index, 9);
        assert_eq!(extreme.undervalued.unwrap().index, 11);
        assert_eq!(extreme.overpriced_count, 2);
        assert_eq!(extreme.undervalued_count, 2);
    }

    #[test]
    fn unpriced_entries_keep_their_positions() {
        let prices = vec![
            None,
            Some(100.0),
            Some(101.0),
            None,
            Some(99.0),
            Some(100.0),
            Some(800.0),
        ];
        let report = detect_outliers(&prices, OutlierSelection::FirstMatch);
        assert_eq!(report.overpriced.unwrap().index, 6);
    }

    #[test]
    fn empty_or_flat_samples_flag_nothing() {
        let report = detect_outliers(&[None, None], OutlierSelection::FirstMatch);
        assert_eq!(report, OutlierReport::default());

        let flat = detect_outliers(&some(&[250.0, 250.0, 250.0]), OutlierSelection::FirstMatch);
        assert_eq!(flat.iqr, 0.0);
        assert!(flat.undervalued.is_none() && flat.overpriced.is_none());
    }
}
