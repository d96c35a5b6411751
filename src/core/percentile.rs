//! Order statistics over simulated project durations
//!
//! Re-derives the P50/P80/P90 markers, mean and standard deviation from the
//! raw duration samples. Percentiles use the nearest-rank-below rule: sort
//! ascending and take the sample at index `floor(n × p)`, clamped to the last
//! sample so that `p = 1.0` yields the maximum. Standard deviation uses the
//! population convention (divide by `n`).

use serde::{Deserialize, Serialize};

pub const P50: f64 = 0.5;
pub const P80: f64 = 0.8;
pub const P90: f64 = 0.9;

/// Index of percentile `p` in a sorted sample of length `n`
///
/// Negative or NaN `p` maps to index 0. Returns 0 for an empty sample;
/// callers check emptiness before indexing.
pub fn percentile_index(n: usize, p: f64) -> usize {
    // Float-to-int casts saturate: negatives and NaN become 0
    let idx = ((n as f64) * p).floor() as usize;
    idx.min(n.saturating_sub(1))
}

/// Percentile of an ascending-sorted sample, `None` when empty
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    sorted.get(percentile_index(sorted.len(), p)).copied()
}

/// Sorted copy of the samples with NaNs removed
pub fn sorted_samples(samples: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = samples.iter().copied().filter(|x| !x.is_nan()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Summary statistics of a duration sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    /// Number of samples used
    pub count: usize,

    pub p50: f64,
    pub p80: f64,
    pub p90: f64,

    pub mean: f64,

    /// Population standard deviation
    pub std_dev: f64,

    pub min: f64,
    pub max: f64,
}

impl DurationStats {
    /// Compute statistics, or `None` when no usable samples exist
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let sorted = sorted_samples(samples);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let stats = Self {
            count: sorted.len(),
            p50: percentile(&sorted, P50)?,
            p80: percentile(&sorted, P80)?,
            p90: percentile(&sorted, P90)?,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        };

        tracing::debug!(
            count = stats.count,
            p50 = stats.p50,
            p80 = stats.p80,
            p90 = stats.p90,
            "derived duration percentiles"
        );

        Some(stats)
    }

    /// Coefficient of variation (std-dev / mean), `None` for a zero mean
    pub fn coefficient_of_variation(&self) -> Option<f64> {
        if self.mean == 0.0 {
            None
        } else {
            Some(self.std_dev / self.mean)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn ten_samples() -> Vec<f64> {
        vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0]
    }

    #[test]
    fn test_reference_scenario() {
        let stats = DurationStats::from_samples(&ten_samples()).unwrap();
        assert_eq!(stats.p50, 20.0);
        assert_eq!(stats.p80, 26.0);
        assert_eq!(stats.p90, 28.0);
        assert_eq!(stats.count, 10);
        assert!((stats.mean - 19.0).abs() < 1e-12);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let mut samples = ten_samples();
        samples.reverse();
        let stats = DurationStats::from_samples(&samples).unwrap();
        assert_eq!(stats.p50, 20.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 28.0);
    }

    #[test]
    fn test_population_std_dev() {
        // mean 5, squared deviations sum to 32 over 8 samples → variance 4
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = DurationStats::from_samples(&samples).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_one_clamps_to_max() {
        let sorted = ten_samples();
        assert_eq!(percentile_index(10, 1.0), 9);
        assert_eq!(percentile(&sorted, 1.0), Some(28.0));
    }

    #[test]
    fn test_percentile_out_of_range_p() {
        let sorted = ten_samples();
        assert_eq!(percentile(&sorted, -0.5), Some(10.0));
        assert_eq!(percentile(&sorted, 1.7), Some(28.0));
        assert_eq!(percentile(&sorted, f64::NAN), Some(10.0));
    }

    #[test]
    fn test_empty_sample() {
        assert!(DurationStats::from_samples(&[]).is_none());
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile_index(0, 0.9), 0);
    }

    #[test]
    fn test_nan_samples_are_ignored() {
        let stats = DurationStats::from_samples(&[f64::NAN, 3.0, 1.0, f64::NAN]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert!(DurationStats::from_samples(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_single_sample() {
        let stats = DurationStats::from_samples(&[42.0]).unwrap();
        assert_eq!(stats.p50, 42.0);
        assert_eq!(stats.p90, 42.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_coefficient_of_variation() {
        let stats = DurationStats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.coefficient_of_variation().unwrap() - 0.4).abs() < 1e-12);
        let zero = DurationStats::from_samples(&[0.0, 0.0]).unwrap();
        assert!(zero.coefficient_of_variation().is_none());
    }

    #[test]
    fn test_markers_ordered_within_range_random_samples() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let n = rng.random_range(1..400);
            let samples: Vec<f64> = (0..n).map(|_| rng.random_range(1.0..500.0)).collect();
            let stats = DurationStats::from_samples(&samples).unwrap();

            assert!(stats.p50 <= stats.p80, "p50 {} > p80 {}", stats.p50, stats.p80);
            assert!(stats.p80 <= stats.p90, "p80 {} > p90 {}", stats.p80, stats.p90);
            assert!(stats.min <= stats.p50 && stats.p90 <= stats.max);
            assert!(stats.min - 1e-9 <= stats.mean && stats.mean <= stats.max + 1e-9);
        }
    }
}
