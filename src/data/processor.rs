//! Data Processor Module
//! Derives the distance difference and splits it by ground-truth sibling status.

use crate::config::{
    AVERAGE_DISTANCE_COL, DISTANCE_DIFF_COL, LINK_NUM_COL, MAX_DISTANCE_COL, SIBLING_COL,
};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Classification of a single `has_GT_SIBLING` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingFlag {
    True,
    False,
    /// Null or any value that is neither true nor false
    Unrecognized,
}

impl SiblingFlag {
    pub fn from_bool(value: Option<bool>) -> Self {
        match value {
            Some(true) => SiblingFlag::True,
            Some(false) => SiblingFlag::False,
            None => SiblingFlag::Unrecognized,
        }
    }

    /// 1 and 0 only.
    pub fn from_number(value: Option<f64>) -> Self {
        match value {
            Some(v) if v == 1.0 => SiblingFlag::True,
            Some(v) if v == 0.0 => SiblingFlag::False,
            _ => SiblingFlag::Unrecognized,
        }
    }

    pub fn from_text(value: Option<&str>) -> Self {
        match value.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("true") => SiblingFlag::True,
            Some("false") => SiblingFlag::False,
            _ => SiblingFlag::Unrecognized,
        }
    }
}

/// Derived columns handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceAnalysis {
    /// `max_distance - average_distance` per row, NaN where either is missing
    pub distance_diff: Vec<f64>,
    pub true_sibling: Vec<f64>,
    pub false_sibling: Vec<f64>,
    pub link_num: Vec<f64>,
    pub unrecognized_flags: usize,
}

impl DistanceAnalysis {
    /// Partition the derived column by sibling flag, keeping row order.
    ///
    /// Rows with an unrecognized flag land in neither subset.
    pub fn partition(distance_diff: Vec<f64>, flags: &[SiblingFlag], link_num: Vec<f64>) -> Self {
        let mut true_sibling = Vec::new();
        let mut false_sibling = Vec::new();
        let mut unrecognized_flags = 0;

        for (&diff, flag) in distance_diff.iter().zip(flags) {
            match flag {
                SiblingFlag::True => true_sibling.push(diff),
                SiblingFlag::False => false_sibling.push(diff),
                SiblingFlag::Unrecognized => unrecognized_flags += 1,
            }
        }

        Self {
            distance_diff,
            true_sibling,
            false_sibling,
            link_num,
            unrecognized_flags,
        }
    }

    /// Rows that made it into either subset.
    pub fn recognized_count(&self) -> usize {
        self.true_sibling.len() + self.false_sibling.len()
    }
}

/// Transformations over the loaded linkage table.
pub struct DataProcessor;

impl DataProcessor {
    /// Add the `distance_diff` column. The input frame is left untouched.
    pub fn with_distance_diff(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let derived = df
            .clone()
            .lazy()
            .with_column(
                (col(MAX_DISTANCE_COL).cast(DataType::Float64)
                    - col(AVERAGE_DISTANCE_COL).cast(DataType::Float64))
                .alias(DISTANCE_DIFF_COL),
            )
            .collect()?;
        Ok(derived)
    }

    /// Run the full transformation: derived column, sibling split, link counts.
    pub fn analyze(df: &DataFrame) -> Result<DistanceAnalysis, ProcessorError> {
        let derived = Self::with_distance_diff(df)?;

        let distance_diff = Self::float_values(derived.column(DISTANCE_DIFF_COL)?)?;
        let flags = Self::sibling_flags(derived.column(SIBLING_COL)?)?;
        let link_num = Self::float_values(derived.column(LINK_NUM_COL)?)?;

        let analysis = DistanceAnalysis::partition(distance_diff, &flags, link_num);

        debug!(
            true_sibling = analysis.true_sibling.len(),
            false_sibling = analysis.false_sibling.len(),
            "partitioned distance difference"
        );
        if analysis.unrecognized_flags > 0 {
            warn!(
                rows = analysis.unrecognized_flags,
                "rows with a {} value other than true/false were excluded", SIBLING_COL
            );
        }

        Ok(analysis)
    }

    /// Column values as f64, nulls and unparseable cells become NaN.
    pub fn float_values(column: &Column) -> Result<Vec<f64>, ProcessorError> {
        let values = column.cast(&DataType::Float64)?;
        let ca = values.f64()?;
        Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Classify every cell of the sibling column according to its dtype.
    pub fn sibling_flags(column: &Column) -> Result<Vec<SiblingFlag>, ProcessorError> {
        let series = column.as_materialized_series();
        let dtype = series.dtype();

        let flags = if dtype == &DataType::Boolean {
            series.bool()?.into_iter().map(SiblingFlag::from_bool).collect()
        } else if dtype.is_integer() || dtype.is_float() {
            let as_float = series.cast(&DataType::Float64)?;
            as_float
                .f64()?
                .into_iter()
                .map(SiblingFlag::from_number)
                .collect()
        } else if dtype == &DataType::String {
            series.str()?.into_iter().map(SiblingFlag::from_text).collect()
        } else {
            vec![SiblingFlag::Unrecognized; series.len()]
        };

        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "max_distance" => [10.0, 7.0, 9.0],
            "average_distance" => [4.0, 7.0, 2.0],
            "has_GT_SIBLING" => [true, false, true],
            "link_num" => [3i64, 1, 5]
        )
        .unwrap()
    }

    #[test]
    fn test_analyze_example_rows() {
        let analysis = DataProcessor::analyze(&sample_frame()).unwrap();

        assert_eq!(analysis.distance_diff, vec![6.0, 0.0, 7.0]);
        assert_eq!(analysis.true_sibling, vec![6.0, 7.0]);
        assert_eq!(analysis.false_sibling, vec![0.0]);
        assert_eq!(analysis.link_num, vec![3.0, 1.0, 5.0]);
        assert_eq!(analysis.unrecognized_flags, 0);
    }

    #[test]
    fn test_distance_diff_matches_subtraction() {
        let df = df!(
            "max_distance" => [0.91, 0.55, 1.0, 0.3],
            "average_distance" => [0.42, 0.55, 0.125, 0.1],
            "has_GT_SIBLING" => [true, false, false, true],
            "link_num" => [1i64, 2, 3, 4]
        )
        .unwrap();

        let derived = DataProcessor::with_distance_diff(&df).unwrap();
        let diff = DataProcessor::float_values(derived.column("distance_diff").unwrap()).unwrap();
        let max = DataProcessor::float_values(df.column("max_distance").unwrap()).unwrap();
        let avg = DataProcessor::float_values(df.column("average_distance").unwrap()).unwrap();

        for i in 0..df.height() {
            assert_eq!(diff[i], max[i] - avg[i]);
        }
        // Source frame is not modified
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_missing_operand_gives_nan() {
        let df = df!(
            "max_distance" => [Some(5.0), None, Some(3.0)],
            "average_distance" => [Some(1.0), Some(2.0), None],
            "has_GT_SIBLING" => [true, true, false],
            "link_num" => [Some(2i64), None, Some(1)]
        )
        .unwrap();

        let analysis = DataProcessor::analyze(&df).unwrap();

        assert_eq!(analysis.distance_diff[0], 4.0);
        assert!(analysis.distance_diff[1].is_nan());
        assert!(analysis.distance_diff[2].is_nan());
        assert!(analysis.link_num[1].is_nan());
        assert_eq!(analysis.true_sibling.len(), 2);
        assert_eq!(analysis.false_sibling.len(), 1);
    }

    #[test]
    fn test_unrecognized_flags_are_excluded() {
        let df = df!(
            "max_distance" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "average_distance" => [0.0, 0.0, 0.0, 0.0, 0.0],
            "has_GT_SIBLING" => [Some("True"), Some("false"), None, Some("maybe"), Some(" TRUE ")],
            "link_num" => [1i64, 1, 1, 1, 1]
        )
        .unwrap();

        let analysis = DataProcessor::analyze(&df).unwrap();

        assert_eq!(analysis.true_sibling, vec![1.0, 5.0]);
        assert_eq!(analysis.false_sibling, vec![2.0]);
        assert_eq!(analysis.unrecognized_flags, 2);
        assert_eq!(analysis.recognized_count() + analysis.unrecognized_flags, df.height());
    }

    #[test]
    fn test_numeric_flags() {
        let df = df!(
            "max_distance" => [1.0, 2.0, 3.0],
            "average_distance" => [0.5, 0.5, 0.5],
            "has_GT_SIBLING" => [1i64, 0, 2],
            "link_num" => [1i64, 1, 1]
        )
        .unwrap();

        let analysis = DataProcessor::analyze(&df).unwrap();

        assert_eq!(analysis.true_sibling, vec![0.5]);
        assert_eq!(analysis.false_sibling, vec![1.5]);
        assert_eq!(analysis.unrecognized_flags, 1);
    }

    #[test]
    fn test_partition_is_disjoint() {
        let diff = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let flags = [
            SiblingFlag::True,
            SiblingFlag::False,
            SiblingFlag::Unrecognized,
            SiblingFlag::False,
            SiblingFlag::True,
            SiblingFlag::False,
        ];

        let analysis = DistanceAnalysis::partition(diff, &flags, Vec::new());

        assert_eq!(analysis.true_sibling, vec![0.1, 0.5]);
        assert_eq!(analysis.false_sibling, vec![0.2, 0.4, 0.6]);
        assert!(analysis
            .true_sibling
            .iter()
            .all(|v| !analysis.false_sibling.contains(v)));
        assert_eq!(analysis.recognized_count(), 5);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let df = sample_frame();

        let first = DataProcessor::analyze(&df).unwrap();
        let second = DataProcessor::analyze(&df).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_flag_parsing() {
        assert_eq!(SiblingFlag::from_text(Some("False")), SiblingFlag::False);
        assert_eq!(SiblingFlag::from_text(Some("")), SiblingFlag::Unrecognized);
        assert_eq!(SiblingFlag::from_number(Some(1.0)), SiblingFlag::True);
        assert_eq!(SiblingFlag::from_number(None), SiblingFlag::Unrecognized);
        assert_eq!(SiblingFlag::from_bool(Some(false)), SiblingFlag::False);
        assert_eq!(SiblingFlag::from_bool(None), SiblingFlag::Unrecognized);
    }

    #[test]
    fn test_null_boolean_flags() {
        let df = df!(
            "max_distance" => [1.0, 2.0, 3.0, 4.0],
            "average_distance" => [0.0, 0.0, 0.0, 0.0],
            "has_GT_SIBLING" => [Some(true), None, Some(false), Some(true)],
            "link_num" => [1i64, 1, 1, 1]
        )
        .unwrap();

        let analysis = DataProcessor::analyze(&df).unwrap();

        assert_eq!(analysis.true_sibling, vec![1.0, 4.0]);
        assert_eq!(analysis.false_sibling, vec![3.0]);
        assert_eq!(analysis.unrecognized_flags, 1);
    }

    #[test]
    fn test_other_dtype_flags_are_unrecognized() {
        let flag = Column::new("has_GT_SIBLING".into(), [0i32, 1, 19000])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![
            Column::new("max_distance".into(), [1.0, 2.0, 3.0]),
            Column::new("average_distance".into(), [0.5, 0.5, 0.5]),
            flag,
            Column::new("link_num".into(), [1i64, 2, 3]),
        ])
        .unwrap();

        let analysis = DataProcessor::analyze(&df).unwrap();

        assert!(analysis.true_sibling.is_empty());
        assert!(analysis.false_sibling.is_empty());
        assert_eq!(analysis.unrecognized_flags, 3);
        assert_eq!(analysis.distance_diff, vec![0.5, 1.5, 2.5]);
    }
}
