//! Zodiac Core - Residual-Based Anomaly Scoring Service
//!
//! Core scoring service of the Zodiac boat-engine predictive-maintenance
//! product. Two independent pipelines compare a live reading against a
//! trained model's expectation and flag the reading as anomalous when the
//! residual exceeds a calibrated threshold:
//!
//! - **Conditional mode**: a regressor predicts the normal vibration for the
//!   current operating conditions (RPM, ambient temperature, fuel level,
//!   sea state); the absolute error against the measured vibration is the
//!   decision statistic.
//! - **Sequence mode**: a forecaster predicts the next value of the
//!   standardized vertical-vibration channel from a 50-sample window; the
//!   absolute error of the last window decides.
//!
//! Models are opaque oracles loaded once at startup. A missing or corrupt
//! artifact degrades the affected pipeline to an explicit "unavailable"
//! state instead of failing the process.

pub mod api;
pub mod constants;
pub mod logic;

pub use api::commands::{engine_status, score_conditional, score_sequence, ScoreReport};
pub use logic::config::EngineConfig;
pub use logic::engine::{EngineStatus, ScoringEngine};
pub use logic::scoring::{ScoreError, Verdict};
