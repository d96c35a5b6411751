//! Equal-width binning of duration samples for the distribution chart

use serde::{Deserialize, Serialize};

/// Default number of bins for the duration distribution
pub const DEFAULT_BINS: usize = 50;

/// One histogram bin covering `[lower, upper)` (the last bin is closed)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Duration distribution histogram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationHistogram {
    pub bins: Vec<HistogramBin>,
}

impl DurationHistogram {
    /// Bin the finite samples into `bin_count` equal-width bins
    ///
    /// All-equal samples collapse into a single bin; no samples (or zero
    /// bins requested) yield an empty histogram.
    pub fn from_samples(samples: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max <= min {
            return Self {
                bins: vec![HistogramBin {
                    lower: min,
                    upper: max,
                    count: finite.len(),
                }],
            };
        }

        let width = (max - min) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for x in finite {
            let idx = (((x - min) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total samples across all bins
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count (0 when empty)
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Bin that a value falls into, clamped to the histogram's range
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        if value <= first.lower || !value.is_finite() {
            return Some(0);
        }
        if value >= last.upper {
            return Some(self.bins.len() - 1);
        }
        self.bins
            .iter()
            .position(|b| value >= b.lower && value < b.upper)
            .or(Some(self.bins.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_sample_size() {
        let samples: Vec<f64> = (0..1000).map(|i| 100.0 + (i % 37) as f64 * 1.5).collect();
        let hist = DurationHistogram::from_samples(&samples, DEFAULT_BINS);
        assert_eq!(hist.bins.len(), DEFAULT_BINS);
        assert_eq!(hist.total(), 1000);
    }

    #[test]
    fn test_max_sample_lands_in_last_bin() {
        let samples = [0.0, 5.0, 10.0];
        let hist = DurationHistogram::from_samples(&samples, 2);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[1].count, 2);
        assert_eq!(hist.bins[1].upper, 10.0);
    }

    #[test]
    fn test_degenerate_distribution_single_bin() {
        let hist = DurationHistogram::from_samples(&[7.0, 7.0, 7.0], 10);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 3);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(DurationHistogram::from_samples(&[], 10).is_empty());
        assert!(DurationHistogram::from_samples(&[1.0, 2.0], 0).is_empty());
        assert!(DurationHistogram::from_samples(&[f64::NAN], 10).is_empty());
        assert_eq!(DurationHistogram::default().max_count(), 0);
        assert_eq!(DurationHistogram::default().bin_index(3.0), None);
    }

    #[test]
    fn test_bin_index_clamps() {
        let samples = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
        let hist = DurationHistogram::from_samples(&samples, 5);
        assert_eq!(hist.bin_index(0.0), Some(0));
        assert_eq!(hist.bin_index(10.5), Some(0));
        assert_eq!(hist.bin_index(20.0), Some(4));
        assert_eq!(hist.bin_index(99.0), Some(4));
    }
}
