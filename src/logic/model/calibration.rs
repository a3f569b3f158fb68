//! Training-time threshold derivation.
//!
//! Reproduces the calibration the training side performs so that a
//! threshold computed here matches one computed there on the same data:
//!
//! - **Conditional**: residuals of the oracle over the healthy prefix of a
//!   time-ordered dataset; threshold = 99th-percentile residual x 1.5.
//! - **Sequence**: standardization fit on the healthy prefix only, windows
//!   over the standardized prefix, per-window absolute error; threshold =
//!   max error x 1.5.
//!
//! Both procedures evaluate on the same slice used to fit the oracle and
//! the normalization. That makes the threshold optimistic about healthy
//! data, and it is kept anyway: changing it would shift every calibrated
//! threshold already in the field.

use thiserror::Error;

use super::oracle::{Oracle, OracleError};
use super::threshold::{Threshold, ThresholdError};
use crate::constants::{HEALTHY_FRACTION, MIN_SEQUENCE_ROWS, RESIDUAL_PERCENTILE, THRESHOLD_MARGIN};
use crate::logic::features::ConditionVector;
use crate::logic::scoring::sequence::{windows, Standardizer};
use crate::logic::telemetry::ConditionReading;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("not enough healthy data: got {got} rows, need at least {required}")]
    NotEnoughData { got: usize, required: usize },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("calibrated threshold is unusable: {0}")]
    Threshold(#[from] ThresholdError),
}

/// Number of leading rows treated as the fault-free regime.
pub fn healthy_cutoff(total_rows: usize) -> usize {
    (total_rows as f64 * HEALTHY_FRACTION) as usize
}

/// Percentile of a sample, linearly interpolated between closest ranks
/// (the same convention NumPy's `percentile` defaults to).
pub fn percentile(samples: &[f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = (sorted.len() - 1) as f64 * q / 100.0;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;

    if lower == upper {
        return Some(sorted[lower]);
    }

    let weight = pos - lower as f64;
    Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Derive the conditional-mode threshold from a time-ordered dataset.
pub fn conditional_threshold(
    oracle: &dyn Oracle,
    rows: &[ConditionReading],
) -> Result<Threshold, CalibrationError> {
    let cutoff = healthy_cutoff(rows.len());
    let healthy = &rows[..cutoff];

    if healthy.is_empty() {
        return Err(CalibrationError::NotEnoughData {
            got: healthy.len(),
            required: 1,
        });
    }

    let mut residuals = Vec::with_capacity(healthy.len());
    for reading in healthy {
        let vector = ConditionVector::from_reading(reading);
        let predicted = oracle.predict(vector.as_slice())?;
        residuals.push((reading.actual_vibration - predicted).abs());
    }

    // healthy is non-empty, so the percentile exists
    let p = percentile(&residuals, RESIDUAL_PERCENTILE).unwrap_or(0.0);

    Ok(Threshold::new(p * THRESHOLD_MARGIN)?)
}

/// Derive the sequence-mode threshold from a time-ordered channel.
pub fn sequence_threshold(
    oracle: &dyn Oracle,
    channel: &[f64],
) -> Result<Threshold, CalibrationError> {
    let cutoff = healthy_cutoff(channel.len());
    let healthy = &channel[..cutoff];

    if healthy.len() < MIN_SEQUENCE_ROWS {
        return Err(CalibrationError::NotEnoughData {
            got: healthy.len(),
            required: MIN_SEQUENCE_ROWS,
        });
    }

    let scaler = Standardizer::fit(healthy);
    let standardized = scaler.transform_all(healthy);

    let mut max_error = f64::NEG_INFINITY;
    for (window, target) in windows(&standardized) {
        let predicted = oracle.predict(window)?;
        let error = (target - predicted).abs();
        if error > max_error {
            max_error = error;
        }
    }

    Ok(Threshold::new(max_error * THRESHOLD_MARGIN)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::SeaState;
    use crate::logic::model::oracle::testing::{ClosureOracle, FixedOracle};

    #[test]
    fn test_healthy_cutoff_floors() {
        assert_eq!(healthy_cutoff(10), 6);
        assert_eq!(healthy_cutoff(101), 60); // 60.6 floors to 60
        assert_eq!(healthy_cutoff(0), 0);
    }

    #[test]
    fn test_percentile_matches_linear_interpolation() {
        let samples = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((percentile(&samples, 50.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((percentile(&samples, 100.0).unwrap() - 5.0).abs() < 1e-12);
        assert!((percentile(&samples, 0.0).unwrap() - 1.0).abs() < 1e-12);
        // pos = 4 * 0.99 = 3.96 -> 4.0 + 0.96 * (5.0 - 4.0)
        assert!((percentile(&samples, 99.0).unwrap() - 4.96).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let samples = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert!((percentile(&samples, 50.0).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_empty() {
        assert_eq!(percentile(&[], 99.0), None);
    }

    fn reading(actual: f64) -> ConditionReading {
        ConditionReading {
            rpm: 2000.0,
            ambient_temp_c: 30.0,
            fuel_level_percent: 50.0,
            sea_state: SeaState::Calm,
            actual_vibration: actual,
        }
    }

    #[test]
    fn test_conditional_threshold_from_residuals() {
        // 10 rows, healthy prefix = 6; oracle predicts 10.0 so residuals of
        // the prefix are 1..=6. p99 over [1..6] = pos 4.95 -> 5.95.
        let rows: Vec<ConditionReading> =
            (1..=10).map(|i| reading(10.0 + i as f64)).collect();
        let oracle = FixedOracle(10.0);

        let threshold = conditional_threshold(&oracle, &rows).unwrap();
        assert!((threshold.value() - 5.95 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_conditional_threshold_empty_data() {
        let oracle = FixedOracle(0.0);
        let err = conditional_threshold(&oracle, &[]).unwrap_err();
        assert!(matches!(err, CalibrationError::NotEnoughData { .. }));
    }

    #[test]
    fn test_sequence_threshold_is_max_error_scaled() {
        // 100 samples -> healthy prefix of 60 -> 10 windows. A zero oracle
        // makes each window's error |standardized target|.
        let channel: Vec<f64> = (0..100).map(|i| (i % 7) as f64).collect();
        let oracle = FixedOracle(0.0);

        let threshold = sequence_threshold(&oracle, &channel).unwrap();

        let healthy = &channel[..60];
        let scaler = Standardizer::fit(healthy);
        let standardized = scaler.transform_all(healthy);
        let max_abs = standardized[crate::constants::WINDOW_SIZE..]
            .iter()
            .map(|v| v.abs())
            .fold(f64::NEG_INFINITY, f64::max);

        assert!((threshold.value() - max_abs * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_threshold_short_channel() {
        let channel = vec![9.8; 50]; // healthy prefix of 30 < 51
        let oracle = FixedOracle(0.0);
        let err = sequence_threshold(&oracle, &channel).unwrap_err();
        assert!(matches!(err, CalibrationError::NotEnoughData { .. }));
    }

    #[test]
    fn test_degenerate_calibration_is_rejected() {
        // A perfect oracle on the healthy prefix yields zero residuals,
        // which can never form a positive threshold.
        let rows: Vec<ConditionReading> = (0..10).map(|_| reading(10.0)).collect();
        let oracle = ClosureOracle(|_: &[f64]| 10.0);

        let err = conditional_threshold(&oracle, &rows).unwrap_err();
        assert!(matches!(err, CalibrationError::Threshold(_)));
    }
}
