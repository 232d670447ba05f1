//! Thermal radiation: fluence at range and material ignition probability
//!
//! # References
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons", ch. VII.
//! - DHS/OSTP (2010). "Planning Guidance for Response to a Nuclear Detonation", 2nd ed.
//!
//! # Attenuation Model
//!
//! Atmospheric losses are a single linear transmissivity factor (default 0.7)
//! applied to the inverse-square fluence. The visibility-dependent
//! Beer-Lambert form `exp(-0.002 d / V)` is not used; transmissivity is the
//! only attenuation input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::units::{CaloriesPerSquareCentimeter, JoulesPerSquareMeter};
use crate::physics::scaling::BurstGeometry;

/// Fraction of total yield emitted as thermal radiation
pub const THERMAL_YIELD_FRACTION: f64 = 0.35;

/// Target material for ignition probability
///
/// Parsing never fails: unrecognised names map to [`Material::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Material {
    /// Dry wood and structural timber
    #[default]
    Wood,
    /// Clothing, curtains and other fabrics
    Fabric,
    /// Generic combustibles
    Other,
}

impl Material {
    /// Logistic steepness `k` (per cal/cm²) and midpoint `θ` (cal/cm²)
    pub const fn ignition_curve(self) -> (f64, f64) {
        match self {
            Self::Wood => (0.1, 15.0),
            Self::Fabric => (0.15, 8.0),
            Self::Other => (0.12, 10.0),
        }
    }

    /// Parse a material name, case-insensitively; unknown names fall back to `Other`
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "wood" => Self::Wood,
            "fabric" => Self::Fabric,
            _ => Self::Other,
        }
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fabric => "fabric",
            Self::Other => "other",
        }
    }
}

impl From<&str> for Material {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Material {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thermal fluence at the observer (cal/cm²)
///
/// # Formula
/// ```text
/// E_th = 0.35 × Y × 4.184e12 J
/// Q    = E_th / (4π R²) × τ
/// ```
///
/// # Arguments
/// * `geometry` - Validated yield and slant range
/// * `transmissivity` - Linear atmospheric transmissivity τ (0-1)
pub fn thermal_fluence(geometry: &BurstGeometry, transmissivity: f64) -> CaloriesPerSquareCentimeter {
    let thermal_energy = THERMAL_YIELD_FRACTION * geometry.yield_kt().to_joules();
    let slant_range = *geometry.slant_range();
    let sphere_area = 4.0 * std::f64::consts::PI * slant_range * slant_range;

    let fluence = JoulesPerSquareMeter::new(thermal_energy / sphere_area).to_cal_per_cm2();
    CaloriesPerSquareCentimeter::new(*fluence * transmissivity)
}

/// Probability that `material` ignites at the given fluence
///
/// Logistic link `1 / (1 + exp(-k (Q - θ)))`; monotonically increasing in
/// fluence and confined to `[0, 1]`.
pub fn ignition_probability(fluence: CaloriesPerSquareCentimeter, material: Material) -> f64 {
    let (k, theta) = material.ignition_curve();
    1.0 / (1.0 + (-k * (*fluence - theta)).exp())
}

/// Thermal quantities at one observation point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// Thermal fluence (cal/cm²)
    pub fluence_cal_per_cm2: f64,
    /// Ignition probability of the configured material
    pub ignition_probability: f64,
}

impl ThermalResult {
    /// Evaluate fluence and ignition probability
    pub fn evaluate(geometry: &BurstGeometry, transmissivity: f64, material: Material) -> Self {
        let fluence = thermal_fluence(geometry, transmissivity);
        Self {
            fluence_cal_per_cm2: *fluence,
            ignition_probability: ignition_probability(fluence, material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fluence_reference_value() {
        let geometry = BurstGeometry::new(20.0, 1000.0, 0.0).unwrap();
        let fluence = thermal_fluence(&geometry, 0.7);
        assert_relative_eq!(*fluence, 38.99296105751435, max_relative = 1e-9);
    }

    #[test]
    fn test_fluence_inverse_square() {
        let near = BurstGeometry::new(10.0, 1000.0, 0.0).unwrap();
        let far = BurstGeometry::new(10.0, 2000.0, 0.0).unwrap();
        let ratio = *thermal_fluence(&near, 0.7) / *thermal_fluence(&far, 0.7);
        assert_relative_eq!(ratio, 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_transmissivity_is_linear() {
        let geometry = BurstGeometry::new(10.0, 3000.0, 0.0).unwrap();
        let clear = thermal_fluence(&geometry, 1.0);
        let hazy = thermal_fluence(&geometry, 0.35);
        assert_relative_eq!(*hazy, *clear * 0.35, max_relative = 1e-12);
        assert_eq!(*thermal_fluence(&geometry, 0.0), 0.0);
    }

    #[test]
    fn test_ignition_midpoints() {
        let p_wood = ignition_probability(CaloriesPerSquareCentimeter::new(15.0), Material::Wood);
        let p_fabric =
            ignition_probability(CaloriesPerSquareCentimeter::new(8.0), Material::Fabric);
        let p_other = ignition_probability(CaloriesPerSquareCentimeter::new(10.0), Material::Other);
        assert_relative_eq!(p_wood, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p_fabric, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p_other, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_ignition_bounds() {
        let none = ignition_probability(CaloriesPerSquareCentimeter::new(0.0), Material::Wood);
        assert_relative_eq!(none, 0.18242552380635635, max_relative = 1e-12);

        let certain = ignition_probability(CaloriesPerSquareCentimeter::new(1.0e6), Material::Wood);
        assert_eq!(certain, 1.0);
    }

    #[test]
    fn test_unknown_material_falls_back() {
        assert_eq!(Material::from_name("Wood"), Material::Wood);
        assert_eq!(Material::from_name(" fabric "), Material::Fabric);
        assert_eq!(Material::from_name("concrete"), Material::Other);
        assert_eq!(Material::from(""), Material::Other);
    }

    #[test]
    fn test_thermal_result_reference() {
        let geometry = BurstGeometry::new(20.0, 1000.0, 0.0).unwrap();
        let result = ThermalResult::evaluate(&geometry, 0.7, Material::Wood);
        assert_relative_eq!(
            result.ignition_probability,
            0.9167736122999119,
            max_relative = 1e-9
        );
    }
}
