//! Descriptive statistics over numeric samples.
//!
//! The plain functions expect a sample that the caller has already filtered
//! (no absent, zero or negative values) and return `0.0` for an empty sample.
//! The two formulas that can divide by zero on a degenerate sample return a
//! [`Measure`] instead of letting NaN or infinity leak out.

use serde::{Deserialize, Serialize};

/// The result of a statistic that is undefined for some samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Measure<T> {
    Value(T),
    NotComputable,
}

impl<T: Copy> Measure<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Measure::Value(v) => Some(*v),
            Measure::NotComputable => None,
        }
    }
}

/// Keeps the present, finite, strictly positive values.
pub fn positive_sample<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect()
}

pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Population standard deviation (divides by N).
pub fn standard_deviation(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    let mu = mean(sample);
    let variance = sample.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / sample.len() as f64;
    variance.sqrt()
}

pub fn median(sample: &[f64]) -> f64 {
    let sorted = sorted(sample);
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Linear-interpolation percentile (the R-7 / spreadsheet method).
///
/// `p` is in percent and is clamped to `[0, 100]`.
pub fn percentile(sample: &[f64], p: f64) -> f64 {
    let sorted = sorted(sample);
    percentile_of_sorted(&sorted, p)
}

pub fn interquartile_range(sample: &[f64]) -> f64 {
    let sorted = sorted(sample);
    percentile_of_sorted(&sorted, 75.0) - percentile_of_sorted(&sorted, 25.0)
}

/// Adjusted Fisher-Pearson skewness.
///
/// Not computable for fewer than three values or a zero standard deviation.
pub fn skewness(sample: &[f64]) -> Measure<f64> {
    let n = sample.len();
    if n < 3 {
        return Measure::NotComputable;
    }
    let mu = mean(sample);
    let sd = standard_deviation(sample);
    if sd == 0.0 {
        return Measure::NotComputable;
    }
    let n = n as f64;
    let cubed: f64 = sample.iter().map(|x| ((x - mu) / sd).powi(3)).sum();
    Measure::Value(n / ((n - 1.0) * (n - 2.0)) * cubed)
}

/// Standard deviation as a percentage of the mean. Not computable when the mean is zero.
pub fn coefficient_of_variation(sample: &[f64]) -> Measure<f64> {
    let mu = mean(sample);
    if mu == 0.0 {
        return Measure::NotComputable;
    }
    Measure::Value(standard_deviation(sample) / mu * 100.0)
}

fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let idx = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
            let lower = idx.floor() as usize;
            let upper = idx.ceil() as usize;
            let weight = idx - lower as f64;
            sorted[lower] + weight * (sorted[upper] - sorted[lower])
        }
    }
}

/// A summary of one numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub skewness: Measure<f64>,
    pub coefficient_of_variation: Measure<f64>,
}

impl SampleStatistics {
    /// Summarises `values` after dropping non-finite and non-positive entries.
    ///
    /// An empty sample produces the zeroed summary from [`SampleStatistics::empty`].
    pub fn compute<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let sample = positive_sample(values.into_iter().map(Some));
        if sample.is_empty() {
            return Self::empty();
        }
        let ordered = sorted(&sample);
        let q1 = percentile_of_sorted(&ordered, 25.0);
        let q3 = percentile_of_sorted(&ordered, 75.0);

        Self {
            count: sample.len(),
            mean: mean(&sample),
            median: median(&sample),
            std_dev: standard_deviation(&sample),
            min: ordered[0],
            max: ordered[ordered.len() - 1],
            q1,
            q3,
            iqr: q3 - q1,
            skewness: skewness(&sample),
            coefficient_of_variation: coefficient_of_variation(&sample),
        }
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
            iqr: 0.0,
            skewness: Measure::NotComputable,
            coefficient_of_variation: Measure::NotComputable,
        }
    }
}

impl Default for SampleStatistics {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn median_of_odd_and_even_samples() {
        assert_eq!(median(&[100.0, 300.0, 200.0]), 200.0);
        assert_eq!(median(&[100.0, 200.0, 300.0, 400.0]), 250.0);
    }

    #[test]
    fn percentile_interpolates_between_neighbours() {
        assert_eq!(percentile(&[10.0, 20.0, 30.0, 40.0], 25.0), 17.5);
        assert_eq!(percentile(&[40.0, 10.0, 30.0, 20.0], 0.0), 10.0);
        assert_eq!(percentile(&[40.0, 10.0, 30.0, 20.0], 100.0), 40.0);
        assert_eq!(percentile(&[10.0, 20.0], 150.0), 20.0);
    }

    #[test]
    fn empty_samples_default_to_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
        assert_eq!(interquartile_range(&[]), 0.0);
        assert_eq!(coefficient_of_variation(&[]), Measure::NotComputable);
        assert_eq!(SampleStatistics::compute(Vec::new()), SampleStatistics::empty());
    }

    #[test]
    fn standard_deviation_is_population() {
        // Population variance of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 4.
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(standard_deviation(&sample), 2.0);
        assert_eq!(coefficient_of_variation(&sample), Measure::Value(40.0));
    }

    #[test]
    fn skewness_guards_degenerate_samples() {
        assert_eq!(skewness(&[1.0, 2.0]), Measure::NotComputable);
        assert_eq!(skewness(&[5.0, 5.0, 5.0]), Measure::NotComputable);
        let symmetric = skewness(&[1.0, 2.0, 3.0]).value().unwrap();
        assert!(symmetric.abs() < 1e-12);
        let right_tail = skewness(&[1.0, 1.0, 1.0, 10.0]).value().unwrap();
        assert!(right_tail > 0.0);
    }

    #[test]
    fn skewness_uses_population_z_scores_with_sample_correction() {
        // Mean 3.25, population sd sqrt(15.1875); Σz³ = 8/√3, scaled by 4/(3·2).
        let skew = skewness(&[1.0, 1.0, 1.0, 10.0]).value().unwrap();
        assert!((skew - 16.0 / (3.0 * 3f64.sqrt())).abs() < 1e-9);
        assert!((skew - 3.0792).abs() < 1e-4);
    }

    #[test]
    fn summary_filters_non_positive_values() {
        let stats = SampleStatistics::compute([0.0, -5.0, f64::NAN, 100.0, 300.0, 200.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.median, 200.0);
        assert_eq!(stats.mean, 200.0);
        assert_eq!(stats.min, 100.0);
        assert_eq!(stats.max, 300.0);
        assert_eq!(stats.q1, 150.0);
        assert_eq!(stats.q3, 250.0);
        assert_eq!(stats.iqr, 100.0);
    }

    proptest! {
        #[test]
        fn prop_percentile_fifty_is_the_median(sample in prop::collection::vec(1.0..1e7f64, 1..60)) {
            prop_assert!(close(percentile(&sample, 50.0), median(&sample)));
        }

        #[test]
        fn prop_iqr_matches_quartiles_and_is_non_negative(sample in prop::collection::vec(1.0..1e7f64, 1..60)) {
            let iqr = interquartile_range(&sample);
            prop_assert!(iqr >= 0.0);
            prop_assert!(close(iqr, percentile(&sample, 75.0) - percentile(&sample, 25.0)));
        }

        #[test]
        fn prop_statistics_are_idempotent(sample in prop::collection::vec(1.0..1e7f64, 0..60)) {
            let first = SampleStatistics::compute(sample.clone());
            let second = SampleStatistics::compute(sample);
            prop_assert_eq!(first, second);
        }
    }
}
