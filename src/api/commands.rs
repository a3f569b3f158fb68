//! Scoring commands consumed by the UI layer.
//!
//! Output is display-formatted text: a one-line status plus a details
//! block with fixed decimal places, matching what the diagnostics panel
//! renders verbatim.

use serde::{Deserialize, Serialize};

use crate::logic::engine::{EngineStatus, ScoringEngine};
use crate::logic::features::{SeaState, UnknownSeaState};
use crate::logic::scoring::{ScoreError, SequenceScore, Verdict};
use crate::logic::telemetry::ConditionReading;

/// What a scoring entry point hands back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub status: String,
    pub details: String,
}

impl ScoreReport {
    pub fn from_error(error: ScoreError) -> Self {
        Self {
            status: format!("Error: {error}"),
            details: String::new(),
        }
    }
}

/// Score one condition reading. The sea state arrives as the UI's string
/// label and is parsed strictly.
pub fn score_conditional(
    engine: &ScoringEngine,
    rpm: f64,
    ambient_temp_c: f64,
    fuel_level_percent: f64,
    sea_state: &str,
    actual_vibration: f64,
) -> ScoreReport {
    let sea_state: SeaState = match sea_state.parse() {
        Ok(state) => state,
        Err(UnknownSeaState(label)) => {
            log::warn!("conditional score rejected: unknown sea state category {label:?}");
            return ScoreReport::from_error(ScoreError::UnknownCategory(label));
        }
    };

    let reading = ConditionReading {
        rpm,
        ambient_temp_c,
        fuel_level_percent,
        sea_state,
        actual_vibration,
    };

    match engine.score_conditional(&reading) {
        Ok(verdict) => {
            log::info!(
                "conditional score: residual={:.4} threshold={:.4} anomaly={}",
                verdict.residual,
                verdict.threshold,
                verdict.is_anomaly
            );
            ScoreReport {
                status: verdict.status_line().to_string(),
                details: conditional_details(&verdict),
            }
        }
        Err(e) => {
            log::warn!("conditional score failed: {e}");
            ScoreReport::from_error(e)
        }
    }
}

/// Score a newline-separated CSV block of IMU rows.
pub fn score_sequence(engine: &ScoringEngine, csv_text: &str) -> ScoreReport {
    match engine.score_sequence(csv_text) {
        Ok(outcome) => {
            log::info!(
                "sequence score: windows={} residual={:.4} threshold={:.4} anomaly={}",
                outcome.windows_evaluated,
                outcome.verdict.residual,
                outcome.verdict.threshold,
                outcome.verdict.is_anomaly
            );
            ScoreReport {
                status: outcome.verdict.status_line().to_string(),
                details: sequence_details(&outcome),
            }
        }
        Err(e) => {
            log::warn!("sequence score failed: {e}");
            ScoreReport::from_error(e)
        }
    }
}

/// Current engine availability and bookkeeping, for a status panel.
pub fn engine_status(engine: &ScoringEngine) -> EngineStatus {
    engine.status()
}

fn conditional_details(verdict: &Verdict) -> String {
    format!(
        "Predicted Normal Vibration: {:.2}\n\
         Actual Measured Vibration: {:.2}\n\
         Calculated Error: {:.4}\n\
         Anomaly Threshold: {:.4}",
        verdict.predicted, verdict.observed, verdict.residual, verdict.threshold
    )
}

fn sequence_details(outcome: &SequenceScore) -> String {
    format!(
        "Predicted Next Value (standardized): {:.4}\n\
         Observed Value (standardized): {:.4}\n\
         Forecast Error: {:.4}\n\
         Anomaly Threshold: {:.4}\n\
         Windows Evaluated: {}",
        outcome.verdict.predicted,
        outcome.verdict.observed,
        outcome.verdict.residual,
        outcome.verdict.threshold,
        outcome.windows_evaluated
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::engine::test_support::pipeline;
    use crate::logic::model::artifacts::ModelKind;
    use crate::logic::model::oracle::testing::FixedOracle;

    fn engine_with_regressor(predicted: f64, threshold: f64) -> ScoringEngine {
        ScoringEngine::with_pipelines(
            Some(pipeline(
                Box::new(FixedOracle(predicted)),
                threshold,
                ModelKind::Regressor,
            )),
            None,
        )
    }

    fn engine_with_forecaster(predicted: f64, threshold: f64) -> ScoringEngine {
        ScoringEngine::with_pipelines(
            None,
            Some(pipeline(
                Box::new(FixedOracle(predicted)),
                threshold,
                ModelKind::Forecaster,
            )),
        )
    }

    #[test]
    fn test_conditional_anomaly_report() {
        let engine = engine_with_regressor(11.0, 0.5);
        let report = score_conditional(&engine, 2500.0, 32.0, 75.0, "Calm", 12.0);

        assert_eq!(report.status, "ANOMALY DETECTED");
        assert_eq!(
            report.details,
            "Predicted Normal Vibration: 11.00\n\
             Actual Measured Vibration: 12.00\n\
             Calculated Error: 1.0000\n\
             Anomaly Threshold: 0.5000"
        );
    }

    #[test]
    fn test_conditional_normal_report() {
        let engine = engine_with_regressor(11.9, 0.5);
        let report = score_conditional(&engine, 2500.0, 32.0, 75.0, "Choppy", 12.0);

        assert_eq!(report.status, "Machine State: Normal");
        assert!(report.details.contains("Calculated Error: 0.1000"));
    }

    #[test]
    fn test_conditional_unknown_category() {
        let engine = engine_with_regressor(11.0, 0.5);
        let report = score_conditional(&engine, 2500.0, 32.0, 75.0, "Tsunami", 12.0);

        assert_eq!(report.status, "Error: unknown sea state category: \"Tsunami\"");
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_conditional_unavailable() {
        let engine = ScoringEngine::with_pipelines(None, None);
        let report = score_conditional(&engine, 2500.0, 32.0, 75.0, "Calm", 12.0);

        assert_eq!(report.status, "Error: model unavailable");
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_conditional_malformed_numeric() {
        let engine = engine_with_regressor(11.0, 0.5);
        let report = score_conditional(&engine, f64::NAN, 32.0, 75.0, "Calm", 12.0);

        assert!(report.status.starts_with("Error: malformed input"));
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_sequence_insufficient_data() {
        let engine = engine_with_forecaster(0.0, 0.5);
        let csv: String = vec!["0,0,9.8,0,0,0,45"; 50].join("\n");
        let report = score_sequence(&engine, &csv);

        assert_eq!(
            report.status,
            "Error: insufficient data: got 50 rows, need at least 51"
        );
        assert!(report.details.is_empty());
    }

    #[test]
    fn test_sequence_normal_report() {
        let engine = engine_with_forecaster(0.0, 0.5);
        let csv: String = vec!["0,0,9.8,0,0,0,45"; 51].join("\n");
        let report = score_sequence(&engine, &csv);

        assert_eq!(report.status, "Machine State: Normal");
        assert!(report.details.contains("Windows Evaluated: 1"));
        assert!(report.details.contains("Forecast Error: 0.0000"));
    }

    #[test]
    fn test_sequence_unavailable() {
        let engine = ScoringEngine::with_pipelines(None, None);
        let report = score_sequence(&engine, "0,0,9.8,0,0,0,45");

        assert_eq!(report.status, "Error: model unavailable");
    }

    #[test]
    fn test_status_round_trips_as_json() {
        let engine = engine_with_regressor(11.0, 0.5);
        let status = engine_status(&engine);

        let json = serde_json::to_string(&status).unwrap();
        let back: EngineStatus = serde_json::from_str(&json).unwrap();
        assert!(back.conditional.available);
        assert!(!back.sequence.available);
    }
}
