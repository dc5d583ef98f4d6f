//! Statistics Calculator Module
//! Descriptive statistics for the plotted series and a Welch t-test between
//! the true and false sibling subsets.

use crate::data::DistanceAnalysis;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Statistics for a single series.
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p05: f64,
}

impl Default for SeriesStats {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
            p05: f64::NAN,
        }
    }
}

/// Outcome of comparing the two sibling subsets.
#[derive(Debug, Clone, Copy)]
pub struct TTestResult {
    pub p_value: f64,
    pub is_significant: bool,
}

/// Everything the viewer shows beneath the histograms.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub true_sibling: SeriesStats,
    pub false_sibling: SeriesStats,
    pub link_num: SeriesStats,
    pub sibling_ttest: TTestResult,
    pub unrecognized_flags: usize,
}

impl AnalysisSummary {
    pub fn rows(&self) -> [&SeriesStats; 3] {
        [&self.false_sibling, &self.true_sibling, &self.link_num]
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics, ignoring NaN.
    pub fn compute_descriptive_stats(values: &[f64]) -> SeriesStats {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = sorted.len();
        if n == 0 {
            return SeriesStats::default();
        }

        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        SeriesStats {
            name: String::new(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            p95: Self::percentile(&sorted, 95.0),
            p05: Self::percentile(&sorted, 5.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Perform Welch's t-test (independent samples, unequal variance).
    pub fn perform_ttest(a: &[f64], b: &[f64]) -> TTestResult {
        let a: Vec<f64> = a.iter().copied().filter(|v| !v.is_nan()).collect();
        let b: Vec<f64> = b.iter().copied().filter(|v| !v.is_nan()).collect();
        let n1 = a.len() as f64;
        let n2 = b.len() as f64;

        let not_testable = TTestResult {
            p_value: f64::NAN,
            is_significant: false,
        };
        if n1 < 2.0 || n2 < 2.0 {
            return not_testable;
        }

        let mean1 = a.iter().sum::<f64>() / n1;
        let mean2 = b.iter().sum::<f64>() / n2;
        let var1 = a.iter().map(|x| (x - mean1).powi(2)).sum::<f64>() / (n1 - 1.0);
        let var2 = b.iter().map(|x| (x - mean2).powi(2)).sum::<f64>() / (n2 - 1.0);

        let se = (var1 / n1 + var2 / n2).sqrt();
        if se == 0.0 {
            return TTestResult {
                p_value: 1.0,
                is_significant: false,
            };
        }

        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1 + var2 / n2).powi(2);
        let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
        let df = df_num / df_denom;

        match StudentsT::new(0.0, 1.0, df) {
            Ok(dist) => {
                let p_value = 2.0 * (1.0 - dist.cdf(t.abs()));
                TTestResult {
                    p_value,
                    is_significant: p_value <= SIGNIFICANCE_THRESHOLD,
                }
            }
            Err(_) => not_testable,
        }
    }

    /// Compute statistics for the three plotted series in parallel.
    pub fn summarize(analysis: &DistanceAnalysis) -> AnalysisSummary {
        let series: [(&str, &[f64]); 3] = [
            ("False Sibling", analysis.false_sibling.as_slice()),
            ("True Sibling", analysis.true_sibling.as_slice()),
            ("Number of links", analysis.link_num.as_slice()),
        ];

        let mut stats: Vec<SeriesStats> = series
            .par_iter()
            .map(|(name, values)| {
                let mut s = Self::compute_descriptive_stats(values);
                s.name = name.to_string();
                s
            })
            .collect();

        let link_num = stats.pop().unwrap_or_default();
        let true_sibling = stats.pop().unwrap_or_default();
        let false_sibling = stats.pop().unwrap_or_default();

        AnalysisSummary {
            true_sibling,
            false_sibling,
            link_num,
            sibling_ttest: Self::perform_ttest(&analysis.true_sibling, &analysis.false_sibling),
            unrecognized_flags: analysis.unrecognized_flags,
        }
    }
}
