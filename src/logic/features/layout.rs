//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the conditional-model feature schema.**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The regressor was trained against this exact column order; reordering
//! silently corrupts every prediction, which is why the layout is hashed
//! and validated rather than assumed.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Current feature layout version.
/// MUST be incremented when the layout changes.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order the regressor consumes them.
/// This is the SINGLE SOURCE OF TRUTH for the conditional feature row.
pub const CONDITION_FEATURE_LAYOUT: &[&str] = &[
    "rpm",                // 0: Engine revolutions per minute
    "ambient_temp_c",     // 1: Ambient temperature, Celsius
    "fuel_level_percent", // 2: Fuel tank level, percent
    "sea_state",          // 3: Sea-state category as integer code
];

/// Total number of conditioning features.
pub const CONDITION_FEATURE_COUNT: usize = 4;

static LAYOUT_HASH: Lazy<u32> = Lazy::new(compute_layout_hash);

/// Compute the CRC32 hash of the feature layout.
/// Used to detect layout mismatches between artifacts and this build.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in CONDITION_FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get the layout hash (computed once, cached).
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Complete layout information for serialization/logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: CONDITION_FEATURE_COUNT,
            feature_names: CONDITION_FEATURE_LAYOUT
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Error when a persisted feature layout doesn't match this build.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming layout metadata matches the current layout.
pub fn validate_layout(
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Get feature index by name (O(n) but features are few).
pub fn feature_index(name: &str) -> Option<usize> {
    CONDITION_FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    CONDITION_FEATURE_LAYOUT.get(index).copied()
}
