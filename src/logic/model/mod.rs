//! Model Module - Oracles, Thresholds, Artifacts
//!
//! - `oracle` - The opaque predictive capability both pipelines score against
//! - `onnx` - ONNX Runtime backed oracle
//! - `threshold` - Fixed anomaly threshold, calibrated at training time
//! - `artifacts` - Loading of serialized models and threshold sidecars
//! - `calibration` - Training-time threshold derivation procedures

pub mod artifacts;
pub mod calibration;
pub mod onnx;
pub mod oracle;
pub mod threshold;

pub use artifacts::{ArtifactError, ModelKind, ModelMetadata, PipelineArtifacts};
pub use onnx::{OnnxOracle, TensorLayout};
pub use oracle::{Oracle, OracleError};
pub use threshold::{Threshold, ThresholdError};
