//! Feature construction for the conditional scoring pipeline.
//!
//! - `layout` - Authoritative feature ordering, versioned and hashed
//! - `vector` - Fixed-order feature row built from a reading
//! - `sea_state` - Categorical sea-state mapping

pub mod layout;
pub mod sea_state;
pub mod vector;

pub use layout::{CONDITION_FEATURE_COUNT, CONDITION_FEATURE_LAYOUT, FEATURE_VERSION};
pub use sea_state::{SeaState, UnknownSeaState};
pub use vector::ConditionVector;
