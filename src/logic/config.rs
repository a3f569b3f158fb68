//! Engine configuration.
//!
//! An explicit, immutable configuration object constructed at startup and
//! handed to the engine - no ambient globals, so tests can point the
//! engine at any directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{model_dir_from_env, DEFAULT_MODEL_DIR};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the model and threshold artifacts.
    pub model_dir: PathBuf,
}

impl EngineConfig {
    /// Resolve configuration from the process environment:
    /// `ZODIAC_MODEL_DIR` if set, otherwise `./models` if present,
    /// otherwise the per-user data directory.
    pub fn from_env() -> Self {
        let model_dir = resolve_model_dir(model_dir_from_env());
        log::debug!("model directory: {}", model_dir.display());
        Self { model_dir }
    }

    pub fn with_model_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            model_dir: dir.as_ref().to_path_buf(),
        }
    }
}

fn resolve_model_dir(env_override: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_override {
        return dir;
    }

    let local = PathBuf::from(DEFAULT_MODEL_DIR);
    if local.is_dir() {
        return local;
    }

    dirs::data_dir()
        .map(|d| d.join("zodiac").join(DEFAULT_MODEL_DIR))
        .unwrap_or(local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let dir = resolve_model_dir(Some(PathBuf::from("/opt/zodiac/models")));
        assert_eq!(dir, PathBuf::from("/opt/zodiac/models"));
    }

    #[test]
    fn test_with_model_dir() {
        let config = EngineConfig::with_model_dir("/tmp/somewhere");
        assert_eq!(config.model_dir, PathBuf::from("/tmp/somewhere"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = resolve_model_dir(None);
        let b = resolve_model_dir(None);
        assert_eq!(a, b);
    }
}
