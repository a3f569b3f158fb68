//! The oracle abstraction: a trained model treated as an opaque function
//! from a feature slice to a predicted value.
//!
//! Both model families implement this trait - the conditional regressor
//! (4 conditioning features in, expected vibration out) and the sequence
//! forecaster (a 50-sample standardized window in, next value out) - so
//! the scoring procedures never know which family backs them.

use thiserror::Error;

/// Failure inside a model backend.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("model session failure: {0}")]
    Session(String),

    #[error("unexpected input length: got {got}, expected {expected}")]
    InputShape { got: usize, expected: usize },

    #[error("model returned no output values")]
    EmptyOutput,
}

/// A trained predictive capability.
pub trait Oracle: Send + Sync {
    /// Predict a single value from the given feature slice.
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError>;
}
