//! # datatrust — Data Quality Scoring & Trust Calibration Engine
//!
//! datatrust scores the trustworthiness of a tabular dataset by blending
//! independent quality signals — completeness, update freshness, and
//! metadata quality — into a single scalar, and can calibrate the
//! blending weights against observed trust labels via constrained
//! least squares on the probability simplex.
//!
//! ## Core Concepts
//!
//! - **Dataset**: named columns of cell values, read-only to the engine
//! - **MetricScores**: the three raw quality scalars plus the outlier report
//! - **WeightVector**: convex blending coefficients (alpha, beta, gamma)
//! - **TrustReport**: the rounded, serializable result of one scoring run
//!
//! ## Usage
//!
//! ```rust
//! use datatrust::{
//!     CellValue, Column, Dataset, Metadata, ScoringConfig, TrustPipeline,
//! };
//!
//! let dataset = Dataset::new(vec![
//!     Column::new("name", vec!["alice", "bob"]),
//!     Column::new("age", vec![CellValue::Int(34), CellValue::Null]),
//! ])?;
//! let metadata = Metadata::new()
//!     .with_entry("last_update_time", "2026-08-20")
//!     .with_description("age", "Customer age in years");
//!
//! let pipeline = TrustPipeline::new(ScoringConfig::default());
//! let report = pipeline.score(&dataset, &metadata);
//! assert!(report.completeness > 0.0);
//! # Ok::<(), datatrust::ValidationError>(())
//! ```
//!
//! Data acquisition, rendering, and persistence are external
//! collaborators; this crate is a pure library boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod value;

// Metrics, blending, calibration, orchestration
pub mod calibrate;
pub mod metrics;
pub mod pipeline;
pub mod weights;

// Re-export primary types at crate root for convenience
pub use calibrate::{
    fit_weights, fit_weights_with_timeout, mean_squared_error, CalibrationSample, OptimizerConfig,
};
pub use dataset::{Column, Dataset};
pub use error::{CalibrationError, TrustError, TrustResult, ValidationError};
pub use metadata::{Metadata, LAST_UPDATE_KEY};
pub use metrics::{
    completeness, detect_outliers, freshness, freshness_at, metadata_quality, FreshnessConfig,
    MetricScores, MissingTimestampPolicy, OutlierMethod, OutlierReport, DEFAULT_DECAY_RATE,
};
pub use pipeline::{ReportId, ScoringConfig, TrustPipeline, TrustReport};
pub use value::{CellValue, ValueKind};
pub use weights::{trust_score, WeightVector, SIMPLEX_TOLERANCE};
