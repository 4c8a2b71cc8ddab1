//! End-to-end calibration scenarios: synthetic weight recovery and
//! pipeline integration.

use std::time::Duration;

use datatrust::{
    fit_weights, CalibrationError, CalibrationSample, OptimizerConfig, ScoringConfig,
    TrustError, TrustPipeline, WeightVector, SIMPLEX_TOLERANCE,
};

const TOL: f64 = 1e-3;

fn labelled_by(weights: [f64; 3], features: &[[f64; 3]]) -> Vec<CalibrationSample> {
    features
        .iter()
        .map(|x| {
            let trust = weights[0] * x[0] + weights[1] * x[1] + weights[2] * x[2];
            CalibrationSample::new(x[0], x[1], x[2], trust)
        })
        .collect()
}

fn config() -> OptimizerConfig {
    OptimizerConfig {
        seed: Some(99),
        ..OptimizerConfig::default()
    }
}

#[test]
fn recovers_the_reference_weight_triple() {
    // 4 noise-free samples labelled by (0.5, 0.3, 0.2).
    let samples = labelled_by(
        [0.5, 0.3, 0.2],
        &[
            [1.0, 0.2, 0.1],
            [0.3, 0.9, 0.5],
            [0.8, 0.4, 0.9],
            [0.2, 0.7, 0.3],
        ],
    );

    let fitted = fit_weights(&samples, None, &config()).unwrap();

    assert!((fitted.alpha - 0.5).abs() < TOL);
    assert!((fitted.beta - 0.3).abs() < TOL);
    assert!((fitted.gamma - 0.2).abs() < TOL);
    assert!(fitted.is_on_simplex(SIMPLEX_TOLERANCE));

    // The fitted blend reproduces each observed trust value.
    for s in &samples {
        let predicted =
            fitted.alpha * s.completeness + fitted.beta * s.freshness + fitted.gamma * s.metadata_quality;
        assert!((predicted - s.observed_trust).abs() < TOL);
    }
}

#[test]
fn fitted_weights_always_lie_on_the_simplex() {
    // Labels no simplex point can reproduce exactly: trust is pushed
    // well above any convex blend of the features.
    let samples = [
        CalibrationSample::new(0.2, 0.1, 0.3, 0.9),
        CalibrationSample::new(0.1, 0.3, 0.2, 0.8),
        CalibrationSample::new(0.3, 0.2, 0.1, 0.95),
    ];

    let fitted = fit_weights(&samples, None, &config()).unwrap();
    assert!(fitted.is_on_simplex(SIMPLEX_TOLERANCE));
}

#[test]
fn calibrated_pipeline_replaces_the_active_weights() {
    let samples = labelled_by(
        [0.5, 0.3, 0.2],
        &[
            [1.0, 0.2, 0.1],
            [0.3, 0.9, 0.5],
            [0.8, 0.4, 0.9],
            [0.2, 0.7, 0.3],
        ],
    );

    let mut pipeline = TrustPipeline::new(ScoringConfig {
        optimizer: config(),
        ..ScoringConfig::default()
    });
    assert_eq!(pipeline.active_weights(), WeightVector::default());

    let fitted = pipeline.calibrate(&samples).unwrap();
    assert_eq!(pipeline.active_weights(), fitted);
    assert!((fitted.alpha - 0.5).abs() < TOL);
}

#[test]
fn zero_samples_fail_fast() {
    let err = fit_weights(&[], None, &config()).unwrap_err();
    assert!(matches!(err, TrustError::Validation(_)));
}

#[test]
fn timed_out_calibration_is_typed_and_non_destructive() {
    let samples = labelled_by(
        [0.4, 0.3, 0.3],
        &[[1.0, 0.2, 0.1], [0.3, 0.9, 0.5], [0.8, 0.4, 0.9]],
    );

    let mut pipeline = TrustPipeline::new(ScoringConfig {
        // Enough restarts that the fit cannot beat a zero timeout.
        optimizer: OptimizerConfig {
            restarts: 100_000,
            ..config()
        },
        ..ScoringConfig::default()
    });
    let before = pipeline.active_weights();

    let err = pipeline
        .calibrate_with_timeout(&samples, Duration::ZERO)
        .unwrap_err();
    assert!(matches!(
        err,
        TrustError::Calibration(CalibrationError::Timeout { .. })
    ));
    assert_eq!(pipeline.active_weights(), before);
}

#[test]
fn generous_timeout_behaves_like_the_plain_fit() {
    let samples = labelled_by(
        [0.5, 0.3, 0.2],
        &[
            [1.0, 0.2, 0.1],
            [0.3, 0.9, 0.5],
            [0.8, 0.4, 0.9],
            [0.2, 0.7, 0.3],
        ],
    );

    let mut pipeline = TrustPipeline::new(ScoringConfig {
        optimizer: config(),
        ..ScoringConfig::default()
    });
    let fitted = pipeline
        .calibrate_with_timeout(&samples, Duration::from_secs(30))
        .unwrap();
    assert!((fitted.alpha - 0.5).abs() < TOL);
}

#[test]
fn two_samples_are_underdetermined_but_feasible() {
    let samples = labelled_by([0.5, 0.3, 0.2], &[[1.0, 0.2, 0.1], [0.3, 0.9, 0.5]]);

    let fitted = fit_weights(&samples, None, &config()).unwrap();
    assert!(fitted.is_on_simplex(SIMPLEX_TOLERANCE));
    // Both observations are still matched exactly: the fit is
    // underdetermined, not infeasible.
    for s in &samples {
        let predicted =
            fitted.alpha * s.completeness + fitted.beta * s.freshness + fitted.gamma * s.metadata_quality;
        assert!((predicted - s.observed_trust).abs() < TOL);
    }
}
