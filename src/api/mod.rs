//! API Module - Entry points for presentation layers
//!
//! The commands convert every library error into a user-facing status
//! string; callers on an interactive surface never see a panic or a raw
//! error value.

pub mod commands;
