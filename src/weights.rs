//! Blending weights and the trust-score combination.
//!
//! A [`WeightVector`] is a convex combination over the three metric
//! scores. The simplex invariant (non-negative components summing to 1)
//! is enforced at construction and by the optimizer; [`trust_score`]
//! itself is a bare dot product and never re-validates.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::metrics::MetricScores;

/// Tolerance for the unit-sum check on construction.
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;

/// Blending coefficients (alpha, beta, gamma) for completeness,
/// freshness, and metadata quality.
///
/// # Examples
///
/// ```
/// use datatrust::WeightVector;
///
/// let weights = WeightVector::default();
/// assert_eq!(weights.as_array(), [0.4, 0.3, 0.3]);
///
/// let custom = WeightVector::new(0.5, 0.3, 0.2).unwrap();
/// assert!((custom.sum() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Weight on completeness.
    pub alpha: f64,
    /// Weight on freshness.
    pub beta: f64,
    /// Weight on metadata quality.
    pub gamma: f64,
}

impl WeightVector {
    /// Creates a validated weight vector.
    ///
    /// # Errors
    ///
    /// Returns `WeightOutOfRange` if any component is outside [0, 1] or
    /// non-finite, and `WeightsNotNormalized` if the components do not
    /// sum to 1 within [`SIMPLEX_TOLERANCE`].
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Result<Self, ValidationError> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::WeightOutOfRange { name, value });
            }
        }
        let sum = alpha + beta + gamma;
        if (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
            return Err(ValidationError::WeightsNotNormalized { sum });
        }
        Ok(Self { alpha, beta, gamma })
    }

    /// Components as `[alpha, beta, gamma]`.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    /// Sum of the components (1.0 up to construction tolerance).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma
    }

    /// Returns true if the components lie on the probability simplex
    /// within the given tolerance.
    #[must_use]
    pub fn is_on_simplex(&self, tolerance: f64) -> bool {
        self.as_array()
            .iter()
            .all(|w| (-tolerance..=1.0 + tolerance).contains(w))
            && (self.sum() - 1.0).abs() <= tolerance
    }
}

impl Default for WeightVector {
    /// The stock blend: 0.4 completeness, 0.3 freshness, 0.3 metadata.
    fn default() -> Self {
        Self {
            alpha: 0.4,
            beta: 0.3,
            gamma: 0.3,
        }
    }
}

/// Blends the three metric scores into a single trust score.
///
/// Pure dot product over the *raw* (un-rounded) scores; no clamping and
/// no weight validation. Establishing the simplex invariant is the
/// caller's job, via [`WeightVector::new`], the default construction, or
/// the optimizer.
#[must_use]
pub fn trust_score(scores: &MetricScores, weights: &WeightVector) -> f64 {
    weights.alpha * scores.completeness
        + weights.beta * scores.freshness
        + weights.gamma * scores.metadata_quality
}
