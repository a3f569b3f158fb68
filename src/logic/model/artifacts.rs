//! Loading of persisted model artifacts.
//!
//! Each pipeline ships two files, written by the training side and never
//! modified here:
//!
//! - the serialized model (`.onnx`)
//! - a threshold sidecar (`.threshold.json`) holding the calibrated scalar
//!   and, optionally, the SHA-256 of the model file it was calibrated
//!   against
//!
//! A missing artifact downgrades the pipeline to "unavailable"; it never
//! fails process startup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::onnx::{OnnxOracle, TensorLayout};
use super::oracle::OracleError;
use super::threshold::{Threshold, ThresholdError};
use crate::constants::{
    FORECASTER_MODEL_FILE, FORECASTER_THRESHOLD_FILE, REGRESSOR_MODEL_FILE,
    REGRESSOR_THRESHOLD_FILE, WINDOW_SIZE,
};
use crate::logic::features::CONDITION_FEATURE_COUNT;

/// Which model family an artifact set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Conditional-mode vibration regressor.
    Regressor,
    /// Sequence-mode next-value forecaster.
    Forecaster,
}

impl ModelKind {
    pub fn model_file(self) -> &'static str {
        match self {
            ModelKind::Regressor => REGRESSOR_MODEL_FILE,
            ModelKind::Forecaster => FORECASTER_MODEL_FILE,
        }
    }

    pub fn threshold_file(self) -> &'static str {
        match self {
            ModelKind::Regressor => REGRESSOR_THRESHOLD_FILE,
            ModelKind::Forecaster => FORECASTER_THRESHOLD_FILE,
        }
    }

    pub fn tensor_layout(self) -> TensorLayout {
        match self {
            ModelKind::Regressor => TensorLayout::Row,
            ModelKind::Forecaster => TensorLayout::Sequence,
        }
    }

    pub fn input_len(self) -> usize {
        match self {
            ModelKind::Regressor => CONDITION_FEATURE_COUNT,
            ModelKind::Forecaster => WINDOW_SIZE,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Regressor => f.write_str("regressor"),
            ModelKind::Forecaster => f.write_str("forecaster"),
        }
    }
}

/// Threshold sidecar contents, as written by the training side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSidecar {
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_sha256: Option<String>,
}

/// Metadata describing a loaded model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: PathBuf,
    pub model_kind: ModelKind,
    pub threshold: f64,
    pub loaded_at: DateTime<Utc>,
}

/// Failure while loading a pipeline's artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact missing: {0}")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid threshold in {path}: {source}")]
    InvalidThreshold {
        path: PathBuf,
        source: ThresholdError,
    },

    #[error("model checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Everything the engine needs to run one pipeline.
#[derive(Debug)]
pub struct PipelineArtifacts {
    pub oracle: OnnxOracle,
    pub threshold: Threshold,
    pub metadata: ModelMetadata,
}

/// Read and validate a threshold sidecar.
pub fn load_sidecar(path: &Path) -> Result<(Threshold, ThresholdSidecar), ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let sidecar: ThresholdSidecar =
        serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let threshold =
        Threshold::new(sidecar.threshold).map_err(|source| ArtifactError::InvalidThreshold {
            path: path.to_path_buf(),
            source,
        })?;

    Ok((threshold, sidecar))
}

/// Verify the model file against the checksum recorded in the sidecar.
pub fn verify_checksum(model_path: &Path, expected: &str) -> Result<(), ArtifactError> {
    let bytes = std::fs::read(model_path).map_err(|source| ArtifactError::Io {
        path: model_path.to_path_buf(),
        source,
    })?;

    let actual = hex::encode(Sha256::digest(&bytes));

    if !actual.eq_ignore_ascii_case(expected) {
        return Err(ArtifactError::ChecksumMismatch {
            path: model_path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}

/// Load one pipeline's artifacts from the model directory.
pub fn load_pipeline(model_dir: &Path, kind: ModelKind) -> Result<PipelineArtifacts, ArtifactError> {
    let model_path = model_dir.join(kind.model_file());
    let sidecar_path = model_dir.join(kind.threshold_file());

    if !model_path.exists() {
        return Err(ArtifactError::Missing(model_path));
    }
    if !sidecar_path.exists() {
        return Err(ArtifactError::Missing(sidecar_path));
    }

    let (threshold, sidecar) = load_sidecar(&sidecar_path)?;

    if let Some(expected) = sidecar.model_sha256.as_deref() {
        verify_checksum(&model_path, expected)?;
    }

    let oracle = OnnxOracle::load(&model_path, kind.tensor_layout(), kind.input_len())?;

    let metadata = ModelMetadata {
        model_path: model_path.clone(),
        model_kind: kind,
        threshold: threshold.value(),
        loaded_at: Utc::now(),
    };

    log::info!(
        "{} pipeline loaded: model={}, threshold={:.4}",
        kind,
        model_path.display(),
        threshold.value()
    );

    Ok(PipelineArtifacts {
        oracle,
        threshold,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_model_kind_artifact_names() {
        assert_eq!(ModelKind::Regressor.model_file(), "vibration_regressor.onnx");
        assert_eq!(ModelKind::Forecaster.model_file(), "az_forecaster.onnx");
        assert_eq!(ModelKind::Regressor.input_len(), 4);
        assert_eq!(ModelKind::Forecaster.input_len(), 50);
    }

    #[test]
    fn test_load_pipeline_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pipeline(dir.path(), ModelKind::Regressor).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing(_)));
    }

    #[test]
    fn test_load_sidecar_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"{"threshold": 0.42}"#).unwrap();

        let (threshold, sidecar) = load_sidecar(&path).unwrap();
        assert_eq!(threshold.value(), 0.42);
        assert!(sidecar.model_sha256.is_none());
    }

    #[test]
    fn test_load_sidecar_rejects_bad_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, r#"{"threshold": -3.0}"#).unwrap();

        let err = load_sidecar(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidThreshold { .. }));
    }

    #[test]
    fn test_load_sidecar_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(&path, "not json").unwrap();

        let err = load_sidecar(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_verify_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"model bytes").unwrap();
        drop(file);

        let good = hex::encode(Sha256::digest(b"model bytes"));
        assert!(verify_checksum(&path, &good).is_ok());
        assert!(verify_checksum(&path, &good.to_uppercase()).is_ok());

        let err = verify_checksum(&path, "deadbeef").unwrap_err();
        assert!(matches!(err, ArtifactError::ChecksumMismatch { .. }));
    }
}
