//! ONNX Runtime backed oracle.
//!
//! Loads a serialized model into an `ort` session and exposes it through
//! the [`Oracle`] trait. The session is owned by the oracle and guarded by
//! a mutex (ort sessions require `&mut` to run); nothing here is global -
//! the engine constructs oracles once at startup and injects them into the
//! scoring procedures.

use std::path::{Path, PathBuf};

use ndarray::{Array2, Array3};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::oracle::{Oracle, OracleError};

/// Input tensor shape a model expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// One feature row: shape `[1, n]`. Used by the conditional regressor.
    Row,
    /// One single-channel window: shape `[1, n, 1]`. Used by the sequence
    /// forecaster.
    Sequence,
}

/// An oracle backed by an ONNX Runtime session.
pub struct OnnxOracle {
    session: Mutex<Session>,
    layout: TensorLayout,
    input_len: usize,
    path: PathBuf,
}

impl std::fmt::Debug for OnnxOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxOracle")
            .field("layout", &self.layout)
            .field("input_len", &self.input_len)
            .field("path", &self.path)
            .finish()
    }
}

impl OnnxOracle {
    /// Load a serialized model from disk.
    pub fn load(
        model_path: &Path,
        layout: TensorLayout,
        input_len: usize,
    ) -> Result<Self, OracleError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(OracleError::Session(format!(
                "model not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| OracleError::Session(format!("failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| OracleError::Session(format!("failed to set optimization: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| OracleError::Session(format!("failed to load model: {e}")))?;

        log::info!("ONNX model loaded successfully");

        Ok(Self {
            session: Mutex::new(session),
            layout,
            input_len,
            path: model_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }
}

impl Oracle for OnnxOracle {
    fn predict(&self, features: &[f64]) -> Result<f64, OracleError> {
        if features.len() != self.input_len {
            return Err(OracleError::InputShape {
                got: features.len(),
                expected: self.input_len,
            });
        }

        let data: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let n = data.len();

        let input_tensor = match self.layout {
            TensorLayout::Row => {
                let array = Array2::<f32>::from_shape_vec((1, n), data)
                    .map_err(|e| OracleError::Session(format!("array error: {e}")))?;
                Value::from_array(array)
            }
            TensorLayout::Sequence => {
                let array = Array3::<f32>::from_shape_vec((1, n, 1), data)
                    .map_err(|e| OracleError::Session(format!("array error: {e}")))?;
                Value::from_array(array)
            }
        }
        .map_err(|e| OracleError::Session(format!("tensor error: {e}")))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| OracleError::Session("no output defined".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| OracleError::Session(format!("inference failed: {e}")))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| OracleError::Session("no output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| OracleError::Session(format!("extract error: {e}")))?;

        let predicted = output_tensor
            .1
            .first()
            .copied()
            .ok_or(OracleError::EmptyOutput)?;

        Ok(f64::from(predicted))
    }
}
