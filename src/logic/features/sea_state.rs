//! Sea-state category and its integer encoding.
//!
//! The regressor was trained with sea state encoded as {Calm: 0, Choppy: 1,
//! Stormy: 2}. Parsing is strict: an unrecognized category is an error, not
//! a silent fallback to Calm.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Sea condition reported alongside an engine reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeaState {
    Calm,
    Choppy,
    Stormy,
}

impl SeaState {
    pub const ALL: [SeaState; 3] = [SeaState::Calm, SeaState::Choppy, SeaState::Stormy];

    /// Integer code the model was trained on.
    pub fn code(self) -> u8 {
        match self {
            SeaState::Calm => 0,
            SeaState::Choppy => 1,
            SeaState::Stormy => 2,
        }
    }

    /// Feature-row value for this category.
    pub fn as_feature(self) -> f64 {
        f64::from(self.code())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeaState::Calm => "Calm",
            SeaState::Choppy => "Choppy",
            SeaState::Stormy => "Stormy",
        }
    }
}

impl std::fmt::Display for SeaState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a sea-state string outside the trained category set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sea state category: {0:?}")]
pub struct UnknownSeaState(pub String);

impl FromStr for SeaState {
    type Err = UnknownSeaState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Calm" => Ok(SeaState::Calm),
            "Choppy" => Ok(SeaState::Choppy),
            "Stormy" => Ok(SeaState::Stormy),
            other => Err(UnknownSeaState(other.to_string())),
        }
    }
}
