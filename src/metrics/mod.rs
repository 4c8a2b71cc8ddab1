//! The four quality metrics: completeness, freshness, metadata quality,
//! and outlier detection.
//!
//! Every metric is a pure, side-effect-free function of the dataset and
//! metadata it receives. Scores are returned *raw* (un-rounded); rounding
//! to 4 decimals happens exactly once, when a report is assembled, so no
//! downstream arithmetic ever consumes a rounded value.

mod completeness;
mod freshness;
mod outliers;
mod quality;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use completeness::completeness;
pub use freshness::{
    freshness, freshness_at, FreshnessConfig, MissingTimestampPolicy, DEFAULT_DECAY_RATE,
};
pub use outliers::{detect_outliers, OutlierMethod, IQR_MULTIPLIER, ZSCORE_THRESHOLD};
pub use quality::metadata_quality;

use crate::dataset::Dataset;
use crate::metadata::Metadata;

/// Sparse outlier report: column name to the ordered set of absolute row
/// indices flagged for that column. Columns without outliers are absent.
pub type OutlierReport = BTreeMap<String, BTreeSet<usize>>;

/// The three raw metric scalars plus the auxiliary outlier report.
///
/// Computed once per scoring run and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    /// Fraction of non-missing cells, in [0, 1].
    pub completeness: f64,

    /// Exponential recency score, in (0, 1] (or the configured default
    /// when the update timestamp is missing or unparseable).
    pub freshness: f64,

    /// Composite column-metadata score, in [0, 1].
    pub metadata_quality: f64,

    /// Outliers per numeric column.
    pub outliers: OutlierReport,
}

impl MetricScores {
    /// Runs all four metrics over one dataset/metadata pair.
    #[must_use]
    pub fn compute(
        dataset: &Dataset,
        metadata: &Metadata,
        freshness_config: &FreshnessConfig,
        outlier_method: OutlierMethod,
    ) -> Self {
        Self {
            completeness: completeness(dataset),
            freshness: freshness(metadata, freshness_config),
            metadata_quality: metadata_quality(dataset, metadata.descriptions()),
            outliers: detect_outliers(dataset, outlier_method),
        }
    }
}

/// Rounds a score to 4 decimal digits for reporting stability.
#[must_use]
pub fn round4(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::value::CellValue;

    #[test]
    fn test_round4() {
        assert!((round4(0.123_456) - 0.1235).abs() < 1e-12);
        assert!((round4(0.75) - 0.75).abs() < 1e-12);
        assert!((round4(0.999_96) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_runs_all_metrics() {
        let dataset = Dataset::new(vec![
            Column::new("a", vec![CellValue::Int(1), CellValue::Null]),
            Column::new("b", vec![CellValue::Text("x".into()), CellValue::Text("y".into())]),
        ])
        .unwrap();
        let metadata = Metadata::new();

        let scores = MetricScores::compute(
            &dataset,
            &metadata,
            &FreshnessConfig::default(),
            OutlierMethod::Iqr,
        );

        assert!((scores.completeness - 0.75).abs() < 1e-12);
        // Strict default policy: missing timestamp scores 0.
        assert!((scores.freshness - 0.0).abs() < 1e-12);
        assert!(scores.outliers.is_empty());
    }
}
