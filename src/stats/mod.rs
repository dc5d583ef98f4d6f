//! Stats module - Descriptive statistics and significance testing

mod calculator;

pub use calculator::{
    AnalysisSummary, SeriesStats, StatsCalculator, SIGNIFICANCE_THRESHOLD,
};
