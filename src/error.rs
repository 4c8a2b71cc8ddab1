//! Error types for datatrust.
//!
//! All errors are strongly typed using thiserror, with enough context
//! (column, method, constraint) to act on. Degenerate inputs that have a
//! defined score (empty dataset, missing or unparseable update timestamp)
//! are values, not errors; only genuinely invalid requests surface here.

use thiserror::Error;

/// Validation errors raised at the input boundary.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown outlier method '{method}' (expected \"IQR\" or \"zscore\")")]
    UnknownOutlierMethod { method: String },

    #[error("Calibration requires at least one sample")]
    EmptyCalibrationSet,

    #[error("Weight {name} = {value} is out of range [0.0, 1.0]")]
    WeightOutOfRange { name: &'static str, value: f64 },

    #[error("Weights sum to {sum}, expected 1.0")]
    WeightsNotNormalized { sum: f64 },

    #[error("Metadata key '{key}' holds a {kind} value; only flat scalars are supported")]
    UnsupportedMetadataValue { key: String, kind: &'static str },
}

/// Errors raised by the weight optimizer.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Optimizer did not converge within {iterations} iterations (objective {objective})")]
    DidNotConverge { iterations: usize, objective: f64 },

    #[error("Fitted weights ({alpha}, {beta}, {gamma}) violate the simplex constraint")]
    ConstraintViolation { alpha: f64, beta: f64, gamma: f64 },

    #[error("Calibration timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Calibration worker exited without reporting a result")]
    WorkerLost,
}

/// Top-level error type for datatrust operations.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),
}

impl TrustError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a calibration error.
    #[must_use]
    pub const fn is_calibration(&self) -> bool {
        matches!(self, Self::Calibration(_))
    }

    /// Returns true if retrying the operation could succeed.
    ///
    /// Validation errors are deterministic; only timed-out or
    /// non-converged calibrations are worth retrying (typically with a
    /// different initial point or a larger budget).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Calibration(e) => matches!(
                e,
                CalibrationError::Timeout { .. } | CalibrationError::DidNotConverge { .. }
            ),
        }
    }
}

/// Result type alias for datatrust operations.
pub type TrustResult<T> = Result<T, TrustError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ValidationError::UnknownOutlierMethod {
            method: "median".to_string(),
        };
        assert!(err.to_string().contains("median"));

        let err = ValidationError::RaggedColumns {
            column: "age".to_string(),
            expected: 4,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("age"));
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_trust_error_predicates() {
        let v: TrustError = ValidationError::EmptyCalibrationSet.into();
        assert!(v.is_validation());
        assert!(!v.is_calibration());
        assert!(!v.is_retryable());

        let c: TrustError = CalibrationError::Timeout { duration_ms: 50 }.into();
        assert!(c.is_calibration());
        assert!(c.is_retryable());

        let c: TrustError = CalibrationError::WorkerLost.into();
        assert!(!c.is_retryable());
    }
}
