//! Logic Module - Scoring Engines & Model Handling
//!
//! - `features/` - Condition feature layout and categorical mapping
//! - `model/` - Oracle abstraction, ONNX inference, thresholds, calibration
//! - `scoring/` - Residual scoring procedures (conditional and sequence)
//! - `engine` - Process-lifetime engine state, constructed once at startup

pub mod config;
pub mod engine;
pub mod features;
pub mod model;
pub mod scoring;
pub mod telemetry;
