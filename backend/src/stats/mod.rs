//! Summary statistics over trial outcomes
//!
//! Population standard deviation (denominator `n`) and a 95% confidence
//! interval for the mean under a normal approximation. No Student-t
//! correction is applied.

pub mod histogram;

pub use histogram::{Histogram, HistogramBin};

use serde::{Deserialize, Serialize};

/// Two-sided 95% quantile of the standard normal distribution
pub const Z_95: f64 = 1.959963984540054;

/// Aggregated result of a multi-trial run
///
/// # Example
///
/// ```rust
/// use gym_disorder_core::SimulationSummary;
///
/// let summary = SimulationSummary::from_outcomes(vec![2, 4, 4, 4, 5, 5, 7, 9]);
/// assert_eq!(summary.mean, 5.0);
/// assert_eq!(summary.std_dev, 2.0);
///
/// let (low, high) = summary.confidence_interval;
/// assert!(low < 5.0 && high > 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Disorder score of every trial, in trial order
    pub outcomes: Vec<usize>,

    /// Arithmetic mean of the outcomes
    pub mean: f64,

    /// Population standard deviation of the outcomes
    pub std_dev: f64,

    /// 95% normal-approximation interval for the mean
    pub confidence_interval: (f64, f64),
}

impl SimulationSummary {
    /// Reduce a sequence of trial outcomes to summary statistics
    pub fn from_outcomes(outcomes: Vec<usize>) -> Self {
        let mean = mean(&outcomes);
        let std_dev = population_std_dev(&outcomes, mean);
        let confidence_interval = normal_confidence_interval(mean, std_dev, outcomes.len());

        Self {
            outcomes,
            mean,
            std_dev,
            confidence_interval,
        }
    }

    pub fn num_trials(&self) -> usize {
        self.outcomes.len()
    }

    pub fn min(&self) -> Option<usize> {
        self.outcomes.iter().copied().min()
    }

    pub fn max(&self) -> Option<usize> {
        self.outcomes.iter().copied().max()
    }
}

/// Arithmetic mean (0.0 for an empty slice)
pub fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a precomputed mean
pub fn population_std_dev(values: &[usize], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// 95% interval `mean ± Z_95 · std_dev / sqrt(n)`
///
/// Degenerates to `(mean, mean)` when `n <= 1` or `std_dev == 0`.
pub fn normal_confidence_interval(mean: f64, std_dev: f64, n: usize) -> (f64, f64) {
    if n <= 1 || std_dev <= 0.0 {
        return (mean, mean);
    }
    let half_width = Z_95 * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std_of_constant_sequence() {
        let summary = SimulationSummary::from_outcomes(vec![3, 3, 3, 3]);
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.confidence_interval, (3.0, 3.0));
    }

    #[test]
    fn test_population_not_sample_std() {
        // Sample std of [0, 2] is sqrt(2); population std is 1
        let summary = SimulationSummary::from_outcomes(vec![0, 2]);
        assert_eq!(summary.std_dev, 1.0);
    }

    #[test]
    fn test_interval_width() {
        let (low, high) = normal_confidence_interval(10.0, 2.0, 100);
        assert!((low - (10.0 - Z_95 * 0.2)).abs() < 1e-12);
        assert!((high - (10.0 + Z_95 * 0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_single_trial_interval_degenerates() {
        assert_eq!(normal_confidence_interval(4.0, 1.5, 1), (4.0, 4.0));
    }

    #[test]
    fn test_empty_outcomes() {
        let summary = SimulationSummary::from_outcomes(vec![]);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.min(), None);
        assert_eq!(summary.num_trials(), 0);
    }
}
