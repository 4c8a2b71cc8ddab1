//! Outlier detection over numeric columns.
//!
//! Both methods report **absolute dataset row indices**: missing cells
//! are dropped before any statistics are computed, but a flagged index
//! always addresses a row of the dataset, never a position within the
//! non-missing subsequence.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::{Column, Dataset};
use crate::error::ValidationError;
use crate::metrics::OutlierReport;

/// Tukey fence multiplier for the IQR method.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Absolute z-score threshold for the z-score method.
pub const ZSCORE_THRESHOLD: f64 = 3.0;

/// Outlier detection strategy.
///
/// Method strings from the configuration surface are resolved here, at
/// the call boundary, never deep inside the algorithm:
///
/// ```
/// use datatrust::OutlierMethod;
///
/// let method: OutlierMethod = "IQR".parse().unwrap();
/// assert_eq!(method, OutlierMethod::Iqr);
/// assert!("median".parse::<OutlierMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierMethod {
    /// Tukey fences: flag values outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR].
    #[default]
    Iqr,
    /// Sample z-score: flag values with |z| > 3.
    #[serde(rename = "zscore")]
    ZScore,
}

impl FromStr for OutlierMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iqr" => Ok(Self::Iqr),
            "zscore" | "z-score" => Ok(Self::ZScore),
            _ => Err(ValidationError::UnknownOutlierMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iqr => write!(f, "IQR"),
            Self::ZScore => write!(f, "zscore"),
        }
    }
}

/// Detects outliers in every numeric column of the dataset.
///
/// Non-numeric columns are skipped silently; missing cells are dropped
/// before any statistics are computed but reported indices stay
/// absolute. Columns with no flagged rows are omitted from the result
/// (sparse representation). A column with zero spread, or too few values
/// for the chosen statistic, yields no outliers.
#[must_use]
pub fn detect_outliers(dataset: &Dataset, method: OutlierMethod) -> OutlierReport {
    let mut report = OutlierReport::new();
    for column in dataset.columns() {
        if !column.is_numeric() {
            continue;
        }
        let flagged = match method {
            OutlierMethod::Iqr => iqr_outliers(column),
            OutlierMethod::ZScore => zscore_outliers(column),
        };
        if !flagged.is_empty() {
            report.insert(column.name.clone(), flagged);
        }
    }
    report
}

fn numeric_cells(column: &Column) -> Vec<(usize, f64)> {
    column
        .present()
        .filter_map(|(idx, v)| v.as_f64().map(|x| (idx, x)))
        .collect()
}

fn iqr_outliers(column: &Column) -> BTreeSet<usize> {
    let cells = numeric_cells(column);
    if cells.is_empty() {
        return BTreeSet::new();
    }

    let mut sorted: Vec<f64> = cells.iter().map(|&(_, x)| x).collect();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;

    cells
        .into_iter()
        .filter(|&(_, x)| x < lower || x > upper)
        .map(|(idx, _)| idx)
        .collect()
}

fn zscore_outliers(column: &Column) -> BTreeSet<usize> {
    let cells = numeric_cells(column);
    let n = cells.len();
    if n < 2 {
        return BTreeSet::new();
    }

    let mean = cells.iter().map(|&(_, x)| x).sum::<f64>() / n as f64;
    // Sample variance (n - 1 denominator).
    let variance = cells
        .iter()
        .map(|&(_, x)| (x - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return BTreeSet::new();
    }

    cells
        .into_iter()
        .filter(|&(_, x)| ((x - mean) / std_dev).abs() > ZSCORE_THRESHOLD)
        .map(|(idx, _)| idx)
        .collect()
}

/// Linear-interpolation quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    if lower + 1 < sorted.len() {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    } else {
        sorted[lower]
    }
}
