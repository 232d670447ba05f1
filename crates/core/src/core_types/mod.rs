//! Core types and utilities

pub mod config;
pub mod scenario;
pub mod units;

// Re-export
pub use config::{EffectsConfig, FalloutGrid, GridQuality, MAX_FALLOUT_RESOLUTION};
pub use scenario::Scenario;
pub use units::*;
