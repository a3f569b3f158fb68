//! Process-lifetime engine state.
//!
//! The engine is built once at startup from explicit configuration and is
//! read-only afterwards: each pipeline owns its oracle and threshold, and
//! scoring calls share them without locking. A pipeline whose artifacts
//! are missing or corrupt is simply absent, and every scoring call against
//! it reports "model unavailable".

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::model::artifacts::{load_pipeline, ArtifactError, ModelKind, ModelMetadata};
use super::model::{Oracle, Threshold};
use super::scoring::{conditional, sequence, ScoreError, SequenceScore, Verdict};
use super::telemetry::ConditionReading;

/// One loaded scoring pipeline: oracle, threshold, bookkeeping.
pub struct Pipeline {
    oracle: Box<dyn Oracle>,
    threshold: Threshold,
    metadata: ModelMetadata,
    inferences: AtomicU64,
}

impl Pipeline {
    pub fn new(oracle: Box<dyn Oracle>, threshold: Threshold, metadata: ModelMetadata) -> Self {
        Self {
            oracle,
            threshold,
            metadata,
            inferences: AtomicU64::new(0),
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn status(&self) -> PipelineStatus {
        PipelineStatus {
            available: true,
            model: Some(self.metadata.model_path.display().to_string()),
            threshold: Some(self.threshold.value()),
            inference_count: self.inferences.load(Ordering::Relaxed),
            loaded_at: Some(self.metadata.loaded_at),
        }
    }
}

/// Availability and bookkeeping for one pipeline, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStatus {
    pub available: bool,
    pub model: Option<String>,
    pub threshold: Option<f64>,
    pub inference_count: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl PipelineStatus {
    fn unavailable() -> Self {
        Self {
            available: false,
            model: None,
            threshold: None,
            inference_count: 0,
            loaded_at: None,
        }
    }
}

/// Engine status for a UI or operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub conditional: PipelineStatus,
    pub sequence: PipelineStatus,
}

/// Both scoring pipelines, each independently present or absent.
pub struct ScoringEngine {
    conditional: Option<Pipeline>,
    sequence: Option<Pipeline>,
}

impl ScoringEngine {
    /// Load both pipelines from the configured model directory. Artifact
    /// problems degrade the affected pipeline; they never fail startup.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            conditional: Self::try_load(config, ModelKind::Regressor),
            sequence: Self::try_load(config, ModelKind::Forecaster),
        }
    }

    /// Build an engine from already-constructed pipelines.
    pub fn with_pipelines(conditional: Option<Pipeline>, sequence: Option<Pipeline>) -> Self {
        Self {
            conditional,
            sequence,
        }
    }

    fn try_load(config: &EngineConfig, kind: ModelKind) -> Option<Pipeline> {
        match load_pipeline(&config.model_dir, kind) {
            Ok(artifacts) => Some(Pipeline::new(
                Box::new(artifacts.oracle),
                artifacts.threshold,
                artifacts.metadata,
            )),
            Err(ArtifactError::Missing(path)) => {
                log::warn!("{kind} pipeline unavailable: {} not found", path.display());
                None
            }
            Err(e) => {
                log::error!("{kind} pipeline unavailable: {e}");
                None
            }
        }
    }

    /// Judge one condition reading against the regressor's expectation.
    pub fn score_conditional(&self, reading: &ConditionReading) -> Result<Verdict, ScoreError> {
        let pipeline = self.conditional.as_ref().ok_or(ScoreError::ModelUnavailable)?;
        let verdict = conditional::score(pipeline.oracle.as_ref(), pipeline.threshold, reading)?;
        pipeline.inferences.fetch_add(1, Ordering::Relaxed);
        Ok(verdict)
    }

    /// Judge a CSV block of IMU rows against the forecaster.
    pub fn score_sequence(&self, csv_text: &str) -> Result<SequenceScore, ScoreError> {
        let pipeline = self.sequence.as_ref().ok_or(ScoreError::ModelUnavailable)?;
        let outcome = sequence::score(pipeline.oracle.as_ref(), pipeline.threshold, csv_text)?;
        pipeline
            .inferences
            .fetch_add(outcome.windows_evaluated as u64, Ordering::Relaxed);
        Ok(outcome)
    }

    pub fn conditional_available(&self) -> bool {
        self.conditional.is_some()
    }

    pub fn sequence_available(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            conditional: self
                .conditional
                .as_ref()
                .map(Pipeline::status)
                .unwrap_or_else(PipelineStatus::unavailable),
            sequence: self
                .sequence
                .as_ref()
                .map(Pipeline::status)
                .unwrap_or_else(PipelineStatus::unavailable),
        }
    }
}
