//! Central Configuration Constants
//!
//! Single source of truth for scoring parameters and artifact naming.
//! To change a default, only edit this file.

use std::path::PathBuf;

/// App name
pub const APP_NAME: &str = "Zodiac Core";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Scoring parameters
// ============================================

/// Window length for the sequence pipeline (samples per model input).
pub const WINDOW_SIZE: usize = 50;

/// Minimum rows a sequence submission must contain: one full window
/// plus the prediction target that follows it.
pub const MIN_SEQUENCE_ROWS: usize = WINDOW_SIZE + 1;

/// Fields per IMU CSV row: ax, ay, az, gx, gy, gz, temperature_c.
pub const IMU_FIELD_COUNT: usize = 7;

/// Index of the vertical-axis vibration channel within an IMU row.
pub const AZ_FIELD_INDEX: usize = 2;

// ============================================
// Calibration parameters
// ============================================

/// Leading fraction of a time-ordered dataset treated as fault-free.
pub const HEALTHY_FRACTION: f64 = 0.6;

/// Residual percentile used for the conditional threshold.
pub const RESIDUAL_PERCENTILE: f64 = 99.0;

/// Safety margin applied on top of the calibrated error statistic.
pub const THRESHOLD_MARGIN: f64 = 1.5;

// ============================================
// Artifact naming
// ============================================

/// Default model directory (relative to the working directory).
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Environment variable overriding the model directory.
pub const MODEL_DIR_ENV: &str = "ZODIAC_MODEL_DIR";

/// Serialized conditional-mode regressor.
pub const REGRESSOR_MODEL_FILE: &str = "vibration_regressor.onnx";

/// Threshold sidecar for the conditional-mode regressor.
pub const REGRESSOR_THRESHOLD_FILE: &str = "vibration_regressor.threshold.json";

/// Serialized sequence-mode forecaster.
pub const FORECASTER_MODEL_FILE: &str = "az_forecaster.onnx";

/// Threshold sidecar for the sequence-mode forecaster.
pub const FORECASTER_THRESHOLD_FILE: &str = "az_forecaster.threshold.json";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the model directory override from the environment, if set.
pub fn model_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(MODEL_DIR_ENV).map(PathBuf::from)
}
