//! Closed-form point-explosion physics
//!
//! Flat modules of pure functions grouped by phenomenon. Every function takes
//! an already validated [`BurstGeometry`] (or validated scalars) and is total
//! over that domain.

pub mod blast;
pub mod fallout;
pub mod radiation;
pub mod scaling;
pub mod thermal;

use serde::{Deserialize, Serialize};

pub use blast::{
    arrival_time, dynamic_pressure, peak_overpressure, positive_phase_duration, BlastResult,
    OverpressureRegime,
};
pub use fallout::{fallout_pattern, FalloutField, FalloutSample, PlumeSpread};
pub use radiation::{prompt_radiation_dose, residual_radiation_dose, RadiationResult};
pub use scaling::{scaled_distance, BurstGeometry, BurstKind};
pub use thermal::{ignition_probability, thermal_fluence, Material, ThermalResult};

/// Physical phenomenon an effect belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phenomenon {
    /// Air blast (overpressure, dynamic pressure, timing)
    Blast,
    /// Thermal radiation
    Thermal,
    /// Prompt and residual ionizing radiation
    Radiation,
    /// Fallout contamination field
    Fallout,
}

impl Phenomenon {
    /// All phenomena in evaluation order
    pub const ALL: [Self; 4] = [Self::Blast, Self::Thermal, Self::Radiation, Self::Fallout];

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blast => "blast",
            Self::Thermal => "thermal",
            Self::Radiation => "radiation",
            Self::Fallout => "fallout",
        }
    }
}
