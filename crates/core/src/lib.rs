//! Point-Explosion Effects Library
//!
//! Deterministic closed-form estimates of the physical effects of a point
//! explosion of given yield, as a function of ground distance and height of
//! burst:
//!
//! - Cube-root blast scaling and piecewise Kingery-Bulmash overpressure
//! - Dynamic pressure, shock arrival time and positive phase duration
//! - Thermal fluence with linear atmospheric transmissivity and ignition probability
//! - Prompt neutron/gamma dose and residual dose rate with t^-1.2 decay
//! - A wind-aligned Gaussian fallout contamination field on a geographic grid
//!
//! Inputs are validated once ([`Scenario::validate`], [`BurstGeometry::new`]
//! or the JSON boundary in [`request`]); the formulas in [`physics`] then
//! assume a valid domain and never return NaN or infinity.
//!
//! ## Example
//!
//! ```
//! use blast_effects_core::{assess, EffectsConfig, Scenario};
//!
//! let scenario = Scenario::new(20.0, 1000.0).with_burst_height(500.0);
//! let report = assess(&scenario, &EffectsConfig::default()).unwrap();
//! assert!(report.blast.overpressure_kpa > 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Physical models
pub mod physics;

// Result assembly, classification and the request boundary
pub mod assessment;
pub mod effects;
pub mod request;

// Re-export core types
pub use core_types::{EffectsConfig, FalloutGrid, GridQuality, Scenario, MAX_FALLOUT_RESOLUTION};
pub use error::{EffectsError, EffectsResult};

// Re-export models and results
pub use assessment::{assess, assess_fallout, EffectsReport};
pub use effects::{
    compass_label, BlastSeverity, CasualtyEstimate, Coordinates, PopulationDensity,
    RadiationSeverity, ThermalSeverity,
};
pub use physics::{
    fallout_pattern, BlastResult, BurstGeometry, BurstKind, FalloutField, FalloutSample, Material,
    Phenomenon, RadiationResult, ThermalResult,
};
pub use request::{handle, Endpoint, Response};
