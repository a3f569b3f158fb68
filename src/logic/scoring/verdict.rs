//! The outcome of one scoring call.

use serde::{Deserialize, Serialize};

use crate::logic::model::Threshold;

/// Judgement of a single observation against the model's expectation.
/// Derived per call and reported; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// The oracle's expectation for this observation.
    pub predicted: f64,
    /// What the sensor actually measured.
    pub observed: f64,
    /// `|observed - predicted|`.
    pub residual: f64,
    /// The calibrated decision threshold.
    pub threshold: f64,
    pub is_anomaly: bool,
}

impl Verdict {
    /// Judge an observation. The comparison is strict: a residual exactly
    /// equal to the threshold is Normal.
    pub fn judge(predicted: f64, observed: f64, threshold: Threshold) -> Self {
        let residual = (observed - predicted).abs();
        Self {
            predicted,
            observed,
            residual,
            threshold: threshold.value(),
            is_anomaly: threshold.exceeded_by(residual),
        }
    }

    /// Status line shown to the operator.
    pub fn status_line(&self) -> &'static str {
        if self.is_anomaly {
            "ANOMALY DETECTED"
        } else {
            "Machine State: Normal"
        }
    }
}
