//! Sequence-mode scoring: windowed next-value forecasting over the
//! vertical-vibration channel.
//!
//! The submitted block is standardized with statistics computed from the
//! block itself, then a 50-sample window slides across it with stride 1.
//! The forecaster predicts the value after each window; the absolute error
//! of the LAST window is the decision statistic.

use crate::constants::{IMU_FIELD_COUNT, MIN_SEQUENCE_ROWS, WINDOW_SIZE};
use crate::logic::model::{Oracle, Threshold};
use crate::logic::telemetry::ImuRow;

use super::{ScoreError, Verdict};

/// Zero-mean unit-variance scaling with population statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardizer {
    mean: f64,
    std: f64,
}

impl Standardizer {
    pub fn fit(samples: &[f64]) -> Self {
        let n = samples.len() as f64;
        if samples.is_empty() {
            return Self { mean: 0.0, std: 0.0 };
        }

        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Self {
            mean,
            std: variance.sqrt(),
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std(&self) -> f64 {
        self.std
    }

    /// A zero-variance channel scales by 1, so constant input maps to an
    /// all-zero standardized channel instead of dividing by zero.
    pub fn transform(&self, value: f64) -> f64 {
        let scale = if self.std > 0.0 { self.std } else { 1.0 };
        (value - self.mean) / scale
    }

    pub fn transform_all(&self, samples: &[f64]) -> Vec<f64> {
        samples.iter().map(|&v| self.transform(v)).collect()
    }
}

/// Stride-1 windows over a channel: each window of `WINDOW_SIZE` samples
/// pairs with the sample immediately after it as the prediction target.
pub fn windows(channel: &[f64]) -> impl Iterator<Item = (&[f64], f64)> + '_ {
    let count = channel.len().saturating_sub(WINDOW_SIZE);
    (0..count).map(move |i| (&channel[i..i + WINDOW_SIZE], channel[i + WINDOW_SIZE]))
}

/// Parse a newline-separated block of IMU CSV rows (no header, 7 numeric
/// fields per row). Blank lines are skipped; anything else malformed is an
/// error naming the offending line.
pub fn parse_rows(csv_text: &str) -> Result<Vec<ImuRow>, ScoreError> {
    let mut rows = Vec::new();

    for (line_no, line) in csv_text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != IMU_FIELD_COUNT {
            return Err(ScoreError::MalformedInput(format!(
                "line {}: expected {} fields, found {}",
                line_no + 1,
                IMU_FIELD_COUNT,
                fields.len()
            )));
        }

        let mut values = [0.0f64; IMU_FIELD_COUNT];
        for (i, field) in fields.iter().enumerate() {
            values[i] = field.trim().parse::<f64>().map_err(|_| {
                ScoreError::MalformedInput(format!(
                    "line {}: invalid number {:?}",
                    line_no + 1,
                    field.trim()
                ))
            })?;
        }

        rows.push(ImuRow::from_fields(values));
    }

    Ok(rows)
}

/// Outcome of a sequence submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceScore {
    pub verdict: Verdict,
    /// How many window/target pairs the block produced.
    pub windows_evaluated: usize,
}

/// Score a CSV block of IMU rows.
pub fn score(
    oracle: &dyn Oracle,
    threshold: Threshold,
    csv_text: &str,
) -> Result<SequenceScore, ScoreError> {
    let rows = parse_rows(csv_text)?;

    if rows.len() < MIN_SEQUENCE_ROWS {
        return Err(ScoreError::InsufficientData {
            rows: rows.len(),
            required: MIN_SEQUENCE_ROWS,
        });
    }

    let channel: Vec<f64> = rows.iter().map(|r| r.az).collect();

    // Statistics are refit on every submission rather than reusing the
    // training-time parameters; calibrated thresholds assume this.
    let scaler = Standardizer::fit(&channel);
    let standardized = scaler.transform_all(&channel);

    let mut last = None;
    let mut evaluated = 0usize;

    for (window, target) in windows(&standardized) {
        let predicted = oracle.predict(window).map_err(|e| {
            log::error!("sequence oracle failure: {e}");
            ScoreError::ModelUnavailable
        })?;
        last = Some((predicted, target));
        evaluated += 1;
    }

    let (predicted, observed) = last.ok_or(ScoreError::InsufficientData {
        rows: rows.len(),
        required: MIN_SEQUENCE_ROWS,
    })?;

    Ok(SequenceScore {
        verdict: Verdict::judge(predicted, observed, threshold),
        windows_evaluated: evaluated,
    })
}
