//! Residual Anomaly Scoring
//!
//! Both pipelines share one shape: build features, ask the oracle for its
//! expectation, compare against the observation, judge the residual
//! against the fixed threshold. Every scoring call is a pure function of
//! (oracle, threshold, input) - no state survives the call.
//!
//! All failures surface as [`ScoreError`] values and are converted to
//! user-facing status text at the API boundary; nothing in here panics on
//! caller input.

pub mod conditional;
pub mod sequence;
pub mod verdict;


pub use sequence::SequenceScore;
pub use verdict::Verdict;

use thiserror::Error;

/// Everything that can go wrong inside a scoring call.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The pipeline's model artifacts were not loaded.
    #[error("model unavailable")]
    ModelUnavailable,

    /// The sequence submission is too short to form a single window and
    /// target.
    #[error("insufficient data: got {rows} rows, need at least {required}")]
    InsufficientData { rows: usize, required: usize },

    /// The input could not be parsed into the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The sea-state category is outside the trained set.
    #[error("unknown sea state category: {0:?}")]
    UnknownCategory(String),
}
