//! Equal-width binning of trial outcomes
//!
//! Front ends draw the distribution of disorder scores from these bins.

use serde::{Deserialize, Serialize};

/// Default number of bins for outcome distributions
pub const DEFAULT_BINS: usize = 20;

/// One histogram bin covering `[lower, upper)` (the last bin is closed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin `outcomes` into `bins` equal-width bins spanning `[min, max]`
    ///
    /// When every outcome is equal (or there is one outcome) a single bin of
    /// width 1 centred on that value is produced. No outcomes, or `bins == 0`,
    /// gives an empty histogram.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gym_disorder_core::Histogram;
    ///
    /// let hist = Histogram::from_outcomes(&[0, 1, 1, 2, 4], 4);
    /// assert_eq!(hist.bins.len(), 4);
    /// assert_eq!(hist.total(), 5);
    /// assert_eq!(hist.bins[0].count, 1);
    /// assert_eq!(hist.bins[3].count, 1);
    /// ```
    pub fn from_outcomes(outcomes: &[usize], bins: usize) -> Self {
        let (min, max) = match (outcomes.iter().min(), outcomes.iter().max()) {
            (Some(&min), Some(&max)) if bins > 0 => (min as f64, max as f64),
            _ => return Self { bins: Vec::new() },
        };

        if max == min {
            return Self {
                bins: vec![HistogramBin {
                    lower: min - 0.5,
                    upper: min + 0.5,
                    count: outcomes.len(),
                }],
            };
        }

        let width = (max - min) / bins as f64;
        let mut result: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: min + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for &outcome in outcomes {
            let index = (((outcome as f64 - min) / width) as usize).min(bins - 1);
            result[index].count += 1;
        }

        Self { bins: result }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count (0 for an empty histogram)
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
