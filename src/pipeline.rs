//! Scoring pipeline: metric computation, optional calibration, blending,
//! and report assembly.
//!
//! The flow is linear — load, compute metrics, optionally calibrate,
//! blend, report — and each run is independent: nothing carries over
//! between runs except the configuration the pipeline was given (and any
//! calibrated weights it installed). Rendering and persistence belong to
//! external collaborators; the pipeline stops at the report value.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calibrate::{fit_weights, fit_weights_with_timeout, CalibrationSample, OptimizerConfig};
use crate::dataset::Dataset;
use crate::error::TrustResult;
use crate::metadata::Metadata;
use crate::metrics::{round4, FreshnessConfig, MetricScores, OutlierMethod, OutlierReport};
use crate::weights::{trust_score, WeightVector};

/// Identifier of one scoring run's report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(uuid::Uuid);

impl ReportId {
    /// Creates a new random report ID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Explicit configuration surface of a scoring run.
///
/// Nothing here is environment-sourced; the caller constructs and owns
/// every knob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Active blending weights (default 0.4 / 0.3 / 0.3).
    pub weights: WeightVector,

    /// Freshness decay rate and missing-timestamp policy.
    pub freshness: FreshnessConfig,

    /// Outlier detection strategy.
    pub outlier_method: OutlierMethod,

    /// Weight-optimizer budget and restart policy.
    pub optimizer: OptimizerConfig,
}

/// The final report handed to the presentation collaborator.
///
/// The three metric scalars and the trust score are rounded to 4
/// decimals here, and only here; all arithmetic upstream used the raw
/// values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    /// Identifier of this scoring run.
    pub id: ReportId,

    /// Completeness score, rounded, in [0, 1].
    pub completeness: f64,

    /// Freshness score, rounded, in (0, 1] (or the configured default).
    pub freshness: f64,

    /// Metadata quality score, rounded, in [0, 1].
    pub metadata_quality: f64,

    /// The weights that produced the trust score.
    pub weights: WeightVector,

    /// Blended trust score, rounded.
    pub trust_score: f64,

    /// Outliers per numeric column (absolute row indices).
    pub outliers: OutlierReport,
}

impl TrustReport {
    /// Assembles a report from raw metric scores and the active weights.
    #[must_use]
    pub fn new(scores: MetricScores, weights: WeightVector) -> Self {
        let blended = trust_score(&scores, &weights);
        Self {
            id: ReportId::new(),
            completeness: round4(scores.completeness),
            freshness: round4(scores.freshness),
            metadata_quality: round4(scores.metadata_quality),
            weights,
            trust_score: round4(blended),
            outliers: scores.outliers,
        }
    }
}

/// Orchestrates metric computation, optional calibration, and blending.
///
/// # Examples
///
/// ```
/// use datatrust::{Column, Dataset, Metadata, ScoringConfig, TrustPipeline};
///
/// let pipeline = TrustPipeline::new(ScoringConfig::default());
/// let dataset = Dataset::new(vec![Column::new("a", vec![1i64, 2])]).unwrap();
/// let metadata = Metadata::new();
///
/// let report = pipeline.score(&dataset, &metadata);
/// assert_eq!(report.completeness, 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrustPipeline {
    config: ScoringConfig,
}

impl TrustPipeline {
    /// Creates a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The currently active weights (default, or installed by a
    /// successful calibration).
    #[must_use]
    pub const fn active_weights(&self) -> WeightVector {
        self.config.weights
    }

    /// The pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one dataset/metadata pair with the active weights.
    #[must_use]
    pub fn score(&self, dataset: &Dataset, metadata: &Metadata) -> TrustReport {
        let scores = MetricScores::compute(
            dataset,
            metadata,
            &self.config.freshness,
            self.config.outlier_method,
        );
        TrustReport::new(scores, self.config.weights)
    }

    /// Fits weights to the calibration samples and installs them as the
    /// active weights.
    ///
    /// On any failure the previously-active weights are untouched; the
    /// caller decides whether to retry or fall back explicitly.
    ///
    /// # Errors
    ///
    /// Propagates [`fit_weights`] errors.
    pub fn calibrate(&mut self, samples: &[CalibrationSample]) -> TrustResult<WeightVector> {
        let fitted = fit_weights(samples, Some(self.config.weights), &self.config.optimizer)?;
        self.config.weights = fitted;
        Ok(fitted)
    }

    /// Like [`Self::calibrate`], bounded by a wall-clock budget.
    ///
    /// A timed-out or cancelled fit never overwrites the active weights.
    ///
    /// # Errors
    ///
    /// Propagates [`fit_weights_with_timeout`] errors.
    pub fn calibrate_with_timeout(
        &mut self,
        samples: &[CalibrationSample],
        timeout: Duration,
    ) -> TrustResult<WeightVector> {
        let fitted = fit_weights_with_timeout(
            samples,
            Some(self.config.weights),
            &self.config.optimizer,
            timeout,
        )?;
        self.config.weights = fitted;
        Ok(fitted)
    }

    /// Calibrates, then scores with the freshly fitted weights.
    ///
    /// # Errors
    ///
    /// Propagates calibration errors; no report is produced and the
    /// active weights are untouched on failure.
    pub fn score_calibrated(
        &mut self,
        dataset: &Dataset,
        metadata: &Metadata,
        samples: &[CalibrationSample],
    ) -> TrustResult<TrustReport> {
        self.calibrate(samples)?;
        Ok(self.score(dataset, metadata))
    }
}
