//! Model configuration and grid quality presets
//!
//! Holds the knobs that the closed-form models expose as defaulted
//! parameters (atmospheric transmissivity, fission fraction, rainout,
//! ignition material) plus the fallout grid size.

use serde::{Deserialize, Serialize};

use crate::error::{require_in_range, require_positive, EffectsError, EffectsResult};
use crate::physics::thermal::Material;

/// Largest accepted fallout grid side; caps memory and CPU per request
pub const MAX_FALLOUT_RESOLUTION: usize = 500;

/// Smallest fallout grid side that still spans `[-radius, radius]`
pub const MIN_FALLOUT_RESOLUTION: usize = 2;

/// Quality preset determining fallout grid resolution
///
/// Mirrors the accuracy/cost trade-off of the discrete normalization: the
/// grid sum approximates the continuous integral better as resolution grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridQuality {
    /// 50×50 samples
    Low,
    /// 100×100 samples (reference resolution)
    #[default]
    Medium,
    /// 250×250 samples
    High,
    /// 500×500 samples, the accepted maximum
    Ultra,
}

impl GridQuality {
    /// Samples per grid side for this preset
    #[must_use]
    pub const fn resolution(&self) -> usize {
        match self {
            Self::Low => 50,
            Self::Medium => 100,
            Self::High => 250,
            Self::Ultra => MAX_FALLOUT_RESOLUTION,
        }
    }

    /// Parse a preset name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "ultra" => Some(Self::Ultra),
            _ => None,
        }
    }
}

/// Fallout grid geometry: `resolution × resolution` samples over `[-radius, radius]²`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloutGrid {
    /// Samples per side
    pub resolution: usize,
    /// Half-width of the square grid (m)
    pub radius_m: f64,
}

impl Default for FalloutGrid {
    fn default() -> Self {
        Self {
            resolution: GridQuality::default().resolution(),
            radius_m: 20_000.0,
        }
    }
}

impl FalloutGrid {
    /// Create a grid from explicit resolution and radius
    pub fn new(resolution: usize, radius_m: f64) -> Self {
        Self {
            resolution,
            radius_m,
        }
    }

    /// Create a grid from a quality preset
    pub fn from_quality(quality: GridQuality, radius_m: f64) -> Self {
        Self::new(quality.resolution(), radius_m)
    }

    /// Check resolution bounds and radius
    ///
    /// # Errors
    /// Returns [`EffectsError::InvalidScenario`] when the resolution is outside
    /// `[MIN_FALLOUT_RESOLUTION, MAX_FALLOUT_RESOLUTION]` or the radius is not
    /// finite and positive.
    pub fn validate(&self) -> EffectsResult<()> {
        if !(MIN_FALLOUT_RESOLUTION..=MAX_FALLOUT_RESOLUTION).contains(&self.resolution) {
            return Err(EffectsError::invalid(
                "resolution",
                format!(
                    "must lie in [{MIN_FALLOUT_RESOLUTION}, {MAX_FALLOUT_RESOLUTION}], got {}",
                    self.resolution
                ),
            ));
        }
        require_positive("radius", self.radius_m)?;
        Ok(())
    }

    /// Distance between adjacent samples along one axis (m)
    pub fn cell_spacing_m(&self) -> f64 {
        2.0 * self.radius_m / (self.resolution - 1) as f64
    }

    /// Local planar coordinate of sample `index` along one axis (m)
    ///
    /// Matches an evenly spaced `linspace(-radius, radius, resolution)`.
    #[inline]
    pub fn axis_coordinate(&self, index: usize) -> f64 {
        -self.radius_m + index as f64 * self.cell_spacing_m()
    }
}

/// Defaulted model parameters shared by every evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Fraction of thermal energy surviving the atmosphere (0-1)
    pub transmissivity: f64,
    /// Fraction of yield from fission (0-1)
    pub fission_fraction: f64,
    /// Precipitation enhancement of fallout deposition, clamped to [1, 3] when applied
    pub rainout_factor: f64,
    /// Target material for ignition probability
    pub material: Material,
    /// Fallout grid geometry
    pub fallout_grid: FalloutGrid,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            transmissivity: 0.7,
            fission_fraction: 0.5,
            rainout_factor: 1.0,
            material: Material::Wood,
            fallout_grid: FalloutGrid::default(),
        }
    }
}

impl EffectsConfig {
    /// Check that every parameter lies in its physical domain
    ///
    /// The rainout factor only needs to be finite: it is clamped, not rejected.
    ///
    /// # Errors
    /// Returns [`EffectsError::InvalidScenario`] naming the first offending field.
    pub fn validate(&self) -> EffectsResult<()> {
        require_in_range("atmosphere", self.transmissivity, 0.0, 1.0)?;
        require_in_range("fission_fraction", self.fission_fraction, 0.0, 1.0)?;
        if !self.rainout_factor.is_finite() {
            return Err(EffectsError::invalid(
                "rainout_factor",
                format!("must be finite, got {}", self.rainout_factor),
            ));
        }
        self.fallout_grid.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_resolutions() {
        assert_eq!(GridQuality::Low.resolution(), 50);
        assert_eq!(GridQuality::Medium.resolution(), 100);
        assert_eq!(GridQuality::High.resolution(), 250);
        assert_eq!(GridQuality::Ultra.resolution(), MAX_FALLOUT_RESOLUTION);
        assert_eq!(GridQuality::from_name(" HIGH "), Some(GridQuality::High));
        assert_eq!(GridQuality::from_name("extreme"), None);
    }

    #[test]
    fn test_default_grid_matches_reference() {
        let grid = FalloutGrid::default();
        assert_eq!(grid.resolution, 100);
        assert_eq!(grid.radius_m, 20_000.0);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_axis_spans_radius() {
        let grid = FalloutGrid::new(5, 100.0);
        assert_eq!(grid.axis_coordinate(0), -100.0);
        assert_eq!(grid.axis_coordinate(2), 0.0);
        assert_eq!(grid.axis_coordinate(4), 100.0);
        assert_eq!(grid.cell_spacing_m(), 50.0);
    }

    #[test]
    fn test_grid_bounds_rejected() {
        assert!(FalloutGrid::new(1, 1000.0).validate().is_err());
        assert!(FalloutGrid::new(MAX_FALLOUT_RESOLUTION + 1, 1000.0)
            .validate()
            .is_err());
        assert!(FalloutGrid::new(10, 0.0).validate().is_err());
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config = EffectsConfig::default();
        assert_eq!(config.transmissivity, 0.7);
        assert_eq!(config.fission_fraction, 0.5);
        assert!(config.validate().is_ok());

        let bad = EffectsConfig {
            transmissivity: 1.2,
            ..EffectsConfig::default()
        };
        assert!(bad.validate().is_err());

        // Out-of-range rainout is clamped later, not rejected
        let wet = EffectsConfig {
            rainout_factor: 7.0,
            ..EffectsConfig::default()
        };
        assert!(wet.validate().is_ok());
    }
}
