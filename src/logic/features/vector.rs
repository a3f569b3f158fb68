//! Condition Vector - the fixed-order feature row fed to the regressor.
//!
//! Always built through [`ConditionVector::from_reading`] so the column
//! order defined in `layout.rs` holds no matter how the caller assembled
//! its payload.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, CONDITION_FEATURE_COUNT};
use crate::logic::telemetry::ConditionReading;

/// Feature row for one conditional-mode prediction, in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionVector {
    values: [f64; CONDITION_FEATURE_COUNT],
}

impl ConditionVector {
    /// Build the feature row from a reading, in layout order:
    /// rpm, ambient_temp_c, fuel_level_percent, sea_state.
    pub fn from_reading(reading: &ConditionReading) -> Self {
        Self {
            values: [
                reading.rpm,
                reading.ambient_temp_c,
                reading.fuel_level_percent,
                reading.sea_state.as_feature(),
            ],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get a feature by its layout name.
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    /// True when every feature value is a finite number.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
