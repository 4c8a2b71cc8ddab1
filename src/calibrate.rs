//! Weight calibration: constrained least-squares fitting of the
//! blending weights against observed trust labels.
//!
//! The fit minimizes the mean squared prediction error over the
//! probability simplex (non-negative weights summing to 1). The solver
//! is projected-gradient descent with Armijo backtracking: the objective
//! is a convex quadratic, but the bound-plus-equality constraints put
//! optima on the simplex boundary, so the Euclidean simplex projection
//! keeps the constraints exact at every iterate. Randomized restarts are
//! compared by objective value and the best solution is retained.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, TrustError, TrustResult, ValidationError};
use crate::weights::{WeightVector, SIMPLEX_TOLERANCE};

/// One historical observation: precomputed metric scores and the trust
/// label observed for them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSample {
    /// Completeness score at observation time.
    pub completeness: f64,
    /// Freshness score at observation time.
    pub freshness: f64,
    /// Metadata quality score at observation time.
    pub metadata_quality: f64,
    /// The trust value actually observed.
    pub observed_trust: f64,
}

impl CalibrationSample {
    /// Creates a sample from the four required values.
    #[must_use]
    pub const fn new(
        completeness: f64,
        freshness: f64,
        metadata_quality: f64,
        observed_trust: f64,
    ) -> Self {
        Self {
            completeness,
            freshness,
            metadata_quality,
            observed_trust,
        }
    }

    const fn features(&self) -> [f64; 3] {
        [self.completeness, self.freshness, self.metadata_quality]
    }
}

/// Optimizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Iteration budget per start.
    pub max_iterations: usize,

    /// Convergence tolerance on the projected step norm.
    pub tolerance: f64,

    /// Number of additional uniform-random simplex starts beyond the
    /// caller-supplied initial point.
    pub restarts: usize,

    /// Seed for the restart draws. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-9,
            restarts: 4,
            seed: None,
        }
    }
}

/// Fits blending weights to calibration samples.
///
/// Solves `min mean((observed - w . features)^2)` subject to `w` on the
/// probability simplex. The fit starts from `initial` (the active or
/// default weights) plus `config.restarts` random simplex points; the
/// start with the lowest objective wins.
///
/// Fewer than 3 samples leaves the 3-parameter fit underdetermined; this
/// is accepted, and the solver will typically land on a simplex boundary.
///
/// # Errors
///
/// - `ValidationError::EmptyCalibrationSet` for zero samples.
/// - `CalibrationError::DidNotConverge` if any start exhausts its
///   iteration budget without meeting the tolerance. The initial weights
///   are never silently returned as if calibrated.
/// - `CalibrationError::ConstraintViolation` if the winning weights do
///   not satisfy the simplex constraint on exit (defensive check).
pub fn fit_weights(
    samples: &[CalibrationSample],
    initial: Option<WeightVector>,
    config: &OptimizerConfig,
) -> TrustResult<WeightVector> {
    if samples.is_empty() {
        return Err(ValidationError::EmptyCalibrationSet.into());
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let first = initial.unwrap_or_default().as_array();
    let mut best = solve_from(samples, first, config)?;
    for _ in 0..config.restarts {
        let candidate = solve_from(samples, random_simplex_point(&mut rng), config)?;
        if candidate.1 < best.1 {
            best = candidate;
        }
    }

    let ([alpha, beta, gamma], _) = best;
    let fitted = WeightVector { alpha, beta, gamma };
    if !fitted.is_on_simplex(SIMPLEX_TOLERANCE) {
        return Err(CalibrationError::ConstraintViolation { alpha, beta, gamma }.into());
    }
    Ok(fitted)
}

/// Runs [`fit_weights`] on a worker thread with a wall-clock budget.
///
/// On timeout the fit is abandoned and `CalibrationError::Timeout` is
/// returned; a partially-converged result is never surfaced, and the
/// caller's active weights are untouched (the worker's result, if it
/// arrives late, is dropped with the channel).
pub fn fit_weights_with_timeout(
    samples: &[CalibrationSample],
    initial: Option<WeightVector>,
    config: &OptimizerConfig,
    timeout: Duration,
) -> TrustResult<WeightVector> {
    let samples = samples.to_vec();
    let config = *config;
    let (tx, rx) = bounded::<TrustResult<WeightVector>>(1);

    let handle = thread::Builder::new()
        .name("datatrust-calibrate".to_string())
        .spawn(move || {
            let _ = tx.send(fit_weights(&samples, initial, &config));
        });
    if handle.is_err() {
        return Err(CalibrationError::WorkerLost.into());
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(CalibrationError::Timeout {
            duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
        .into()),
        Err(RecvTimeoutError::Disconnected) => Err(CalibrationError::WorkerLost.into()),
    }
}

/// Mean squared prediction error of a weight triple over the samples.
#[must_use]
pub fn mean_squared_error(samples: &[CalibrationSample], weights: &WeightVector) -> f64 {
    objective(samples, &weights.as_array())
}

fn objective(samples: &[CalibrationSample], w: &[f64; 3]) -> f64 {
    let n = samples.len() as f64;
    samples
        .iter()
        .map(|s| {
            let residual = predict(w, &s.features()) - s.observed_trust;
            residual * residual
        })
        .sum::<f64>()
        / n
}

fn predict(w: &[f64; 3], x: &[f64; 3]) -> f64 {
    w[0] * x[0] + w[1] * x[1] + w[2] * x[2]
}

fn gradient(samples: &[CalibrationSample], w: &[f64; 3]) -> [f64; 3] {
    let n = samples.len() as f64;
    let mut grad = [0.0; 3];
    for s in samples {
        let x = s.features();
        let residual = predict(w, &x) - s.observed_trust;
        for (g, xi) in grad.iter_mut().zip(x) {
            *g += 2.0 * residual * xi / n;
        }
    }
    grad
}

/// Projected-gradient descent from one starting point.
///
/// Returns the iterate and its objective, or `DidNotConverge` when the
/// iteration budget runs out before the projected step shrinks below the
/// tolerance.
fn solve_from(
    samples: &[CalibrationSample],
    start: [f64; 3],
    config: &OptimizerConfig,
) -> Result<([f64; 3], f64), CalibrationError> {
    let mut w = project_onto_simplex(start);
    let mut value = objective(samples, &w);

    for _ in 0..config.max_iterations {
        let grad = gradient(samples, &w);

        // Armijo backtracking on the projected step.
        let mut step = 1.0;
        let mut accepted = None;
        for _ in 0..60 {
            let candidate = project_onto_simplex([
                w[0] - step * grad[0],
                w[1] - step * grad[1],
                w[2] - step * grad[2],
            ]);
            let candidate_value = objective(samples, &candidate);
            let decrease: f64 = candidate
                .iter()
                .zip(&w)
                .map(|(c, p)| (c - p) * (c - p))
                .sum();
            if candidate_value <= value - 1e-4 * decrease / step {
                accepted = Some((candidate, candidate_value, decrease));
                break;
            }
            step *= 0.5;
        }

        let Some((next, next_value, decrease)) = accepted else {
            // No descent step exists: we are at a constrained stationary
            // point of a convex objective, which is the optimum.
            return Ok((w, value));
        };

        let moved = decrease.sqrt();
        w = next;
        value = next_value;
        if moved < config.tolerance {
            return Ok((w, value));
        }
    }

    Err(CalibrationError::DidNotConverge {
        iterations: config.max_iterations,
        objective: value,
    })
}

/// Euclidean projection of a point onto the probability simplex
/// `{ w : w >= 0, sum(w) = 1 }` (sort / running-sum threshold).
fn project_onto_simplex(point: [f64; 3]) -> [f64; 3] {
    let mut sorted = point;
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut cumulative = 0.0;
    let mut threshold = 0.0;
    for (k, &value) in sorted.iter().enumerate() {
        cumulative += value;
        let candidate = (cumulative - 1.0) / (k + 1) as f64;
        if value - candidate > 0.0 {
            threshold = candidate;
        }
    }

    point.map(|v| (v - threshold).max(0.0))
}

/// Uniform draw from the probability simplex via normalized Exp(1)
/// variates.
fn random_simplex_point(rng: &mut StdRng) -> [f64; 3] {
    let mut draws = [0.0f64; 3];
    for d in &mut draws {
        // gen::<f64>() is in [0, 1); flip to (0, 1] so ln() is finite.
        *d = -(1.0 - rng.gen::<f64>()).ln();
    }
    let total: f64 = draws.iter().sum();
    draws.map(|d| d / total)
}
