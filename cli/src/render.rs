//! Plain-text rendering of run results

use gym_disorder_core::{Histogram, RunReport, SweepPoint};
use std::fmt::Write;

/// Widest bar drawn, in characters
const BAR_WIDTH: usize = 50;

pub fn summary(report: &RunReport) -> String {
    let s = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Simulation results ({} trials)", s.num_trials());
    let _ = writeln!(out, "  Run id:              {}", report.run_id);
    let _ = writeln!(out, "  Seed:                {}", report.master_seed);
    let _ = writeln!(
        out,
        "  People per day:      {} organized, {} disorganized",
        report.config.organized_count, report.config.disorganized_count
    );
    let _ = writeln!(out, "  Mean disorder:       {:.2}", s.mean);
    let _ = writeln!(out, "  Standard deviation:  {:.2}", s.std_dev);
    let _ = writeln!(
        out,
        "  95% CI:              [{:.2}, {:.2}]",
        s.confidence_interval.0, s.confidence_interval.1
    );
    out
}

/// Horizontal bar chart of the outcome distribution
pub fn histogram(hist: &Histogram) -> String {
    let mut out = String::from("Distribution of end-of-day disorder\n");
    let max = hist.max_count();

    for bin in &hist.bins {
        let _ = writeln!(
            out,
            "{:>7.1} - {:<7.1} | {:<width$} {}",
            bin.lower,
            bin.upper,
            bar(bin.count, max),
            bin.count,
            width = BAR_WIDTH
        );
    }
    out
}

/// Table of mean disorder per disorganized share
pub fn sweep(points: &[SweepPoint]) -> String {
    let mut out = String::from("Impact of the disorganized share\n");
    let max = points
        .iter()
        .map(|p| p.mean_disorder)
        .fold(0.0_f64, f64::max);

    for p in points {
        let length = if max > 0.0 {
            ((p.mean_disorder / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:>4.0}% | {:<width$} {:.2}",
            p.fraction_disorganized * 100.0,
            "#".repeat(length),
            p.mean_disorder,
            width = BAR_WIDTH
        );
    }
    out
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat((count * BAR_WIDTH).div_ceil(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(10, 10).len(), BAR_WIDTH);
        assert_eq!(bar(5, 10).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(0, 0), "");
    }

    #[test]
    fn test_histogram_one_line_per_bin() {
        let hist = Histogram::from_outcomes(&[1, 2, 2, 3, 9], 4);
        let text = histogram(&hist);
        assert_eq!(text.lines().count(), 1 + 4);
    }

    #[test]
    fn test_sweep_rows() {
        let points = vec![
            SweepPoint {
                fraction_disorganized: 0.0,
                organized_count: 10,
                disorganized_count: 0,
                mean_disorder: 0.0,
            },
            SweepPoint {
                fraction_disorganized: 1.0,
                organized_count: 0,
                disorganized_count: 10,
                mean_disorder: 8.5,
            },
        ];
        let text = sweep(&points);

        assert!(text.contains("100% |"));
        assert!(text.contains("8.50"));
        assert_eq!(text.lines().count(), 3);
    }
}
