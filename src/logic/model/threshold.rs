//! Anomaly threshold: a single positive scalar fixed at training time.
//!
//! The decision rule is strict - a residual exactly equal to the threshold
//! is still Normal. Once loaded the value never changes for the lifetime
//! of the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of an invalid threshold artifact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("threshold must be positive, got {0}")]
    NotPositive(f64),

    #[error("threshold must be finite, got {0}")]
    NotFinite(f64),
}

/// The residual magnitude above which an observation is anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Threshold(f64);

impl Threshold {
    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if !value.is_finite() {
            return Err(ThresholdError::NotFinite(value));
        }
        if value <= 0.0 {
            return Err(ThresholdError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Strict comparison: equality is Normal.
    pub fn exceeded_by(self, residual: f64) -> bool {
        residual > self.0
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(Threshold::new(0.0), Err(ThresholdError::NotPositive(0.0)));
        assert_eq!(Threshold::new(-1.0), Err(ThresholdError::NotPositive(-1.0)));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Threshold::new(f64::NAN),
            Err(ThresholdError::NotFinite(_))
        ));
        assert!(matches!(
            Threshold::new(f64::INFINITY),
            Err(ThresholdError::NotFinite(_))
        ));
    }

    #[test]
    fn test_strict_boundary() {
        let threshold = Threshold::new(0.5).unwrap();
        assert!(!threshold.exceeded_by(0.4));
        assert!(!threshold.exceeded_by(0.5)); // equality is Normal
        assert!(threshold.exceeded_by(0.5000001));
    }

    #[test]
    fn test_serde_transparent() {
        let threshold = Threshold::new(0.1234).unwrap();
        let json = serde_json::to_string(&threshold).unwrap();
        assert_eq!(json, "0.1234");

        let back: Threshold = serde_json::from_str(&json).unwrap();
        assert_eq!(back, threshold);
    }
}
