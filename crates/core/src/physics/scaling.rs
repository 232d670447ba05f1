//! Cube-root (Hopkinson-Cranz) blast scaling
//!
//! Converts yield and range into the scaled distance used by every blast fit:
//!
//! ```text
//! Z = R_slant / W^(1/3)
//! R_slant = sqrt(d² + h²)
//! W = yield_kt × 10⁶  (kg TNT)
//! ```
//!
//! # References
//! - Kingery, C.N., Bulmash, G. (1984). "Airblast parameters from TNT spherical air burst
//!   and hemispherical surface burst." Technical Report ARBRL-TR-02555, US Army BRL.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::units::{Kilotons, Meters};
use crate::error::{require_non_negative, require_positive, EffectsError, EffectsResult};

/// Which positive-phase duration formula applies
///
/// Selected once, explicitly, instead of comparing a float height inside the
/// formula: a height of exactly `0.0` is a surface burst, anything above is
/// an air burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurstKind {
    /// Detonation on the ground (height of burst zero)
    Surface,
    /// Detonation above the ground
    Air,
}

impl BurstKind {
    /// Classify a height of burst
    pub fn from_height(burst_height_m: f64) -> Self {
        if burst_height_m == 0.0 {
            Self::Surface
        } else {
            Self::Air
        }
    }

    /// `true` for [`BurstKind::Surface`]
    pub fn is_surface(self) -> bool {
        matches!(self, Self::Surface)
    }
}

/// Validated yield and observation geometry
///
/// Construction rejects non-positive yield, negative ranges and the zero slant
/// range, so the formulas in [`crate::physics`] never see a degenerate input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstGeometry {
    yield_kt: Kilotons,
    ground_range: Meters,
    burst_height: Meters,
    burst: BurstKind,
}

impl BurstGeometry {
    /// Validate and build a geometry; the burst kind is derived from the height
    ///
    /// # Errors
    /// - [`EffectsError::InvalidScenario`] if `yield_kt <= 0`, a range is negative,
    ///   or any input is not finite
    /// - [`EffectsError::NumericDegenerate`] if the slant range is zero
    ///   (surface burst observed at ground zero)
    pub fn new(yield_kt: f64, distance_m: f64, burst_height_m: f64) -> EffectsResult<Self> {
        let yield_kt = require_positive("yield", yield_kt)?;
        let distance_m = require_non_negative("distance", distance_m)?;
        let burst_height_m = require_non_negative("burst_height", burst_height_m)?;

        let geometry = Self {
            yield_kt: Kilotons::new(yield_kt),
            ground_range: Meters::new(distance_m),
            burst_height: Meters::new(burst_height_m),
            burst: BurstKind::from_height(burst_height_m),
        };

        if *geometry.slant_range() <= 0.0 {
            return Err(EffectsError::degenerate(
                "slant_range",
                "is zero: surface burst observed at ground zero",
            ));
        }

        Ok(geometry)
    }

    /// Override the burst kind derived from the height
    pub fn with_burst_kind(mut self, burst: BurstKind) -> Self {
        self.burst = burst;
        self
    }

    /// Yield
    pub fn yield_kt(&self) -> Kilotons {
        self.yield_kt
    }

    /// Yield as kilograms of TNT
    pub fn yield_kg(&self) -> f64 {
        self.yield_kt.to_kilograms_tnt()
    }

    /// `W^(1/3)` with W in kg TNT
    pub fn cube_root_yield(&self) -> f64 {
        self.yield_kg().cbrt()
    }

    /// Horizontal distance from ground zero
    pub fn ground_range(&self) -> Meters {
        self.ground_range
    }

    /// Height of burst
    pub fn burst_height(&self) -> Meters {
        self.burst_height
    }

    /// Surface or air burst
    pub fn burst(&self) -> BurstKind {
        self.burst
    }

    /// Straight-line distance from the burst point to the observer
    pub fn slant_range(&self) -> Meters {
        self.ground_range.hypot(self.burst_height)
    }

    /// Scaled distance Z (m/kg^(1/3))
    pub fn scaled_distance(&self) -> f64 {
        *self.slant_range() / self.cube_root_yield()
    }
}

/// Scaled distance Z for raw inputs
///
/// # Errors
/// Same as [`BurstGeometry::new`]; a non-positive yield is an
/// [`EffectsError::InvalidScenario`], never a silent NaN.
pub fn scaled_distance(yield_kt: f64, distance_m: f64, burst_height_m: f64) -> EffectsResult<f64> {
    let z = BurstGeometry::new(yield_kt, distance_m, burst_height_m)?.scaled_distance();
    debug!(yield_kt, distance_m, burst_height_m, z, "scaled distance");
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_kiloton_at_hundred_meters() {
        // W = 10⁶ kg, W^(1/3) = 100, so Z = R / 100
        let z = scaled_distance(1.0, 100.0, 0.0).unwrap();
        assert_relative_eq!(z, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_slant_range_includes_height() {
        let geometry = BurstGeometry::new(1.0, 300.0, 400.0).unwrap();
        assert_eq!(*geometry.slant_range(), 500.0);
        assert_relative_eq!(geometry.scaled_distance(), 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_hiroshima_scale() {
        let z = scaled_distance(20.0, 1000.0, 0.0).unwrap();
        assert_relative_eq!(z, 3.6840314986403877, max_relative = 1e-12);
    }

    #[test]
    fn test_non_positive_yield_rejected() {
        assert!(matches!(
            scaled_distance(0.0, 100.0, 0.0),
            Err(EffectsError::InvalidScenario { field: "yield", .. })
        ));
        assert!(scaled_distance(-5.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn test_zero_slant_range_is_degenerate() {
        assert!(matches!(
            BurstGeometry::new(10.0, 0.0, 0.0),
            Err(EffectsError::NumericDegenerate { .. })
        ));
        // Directly beneath an air burst is fine
        assert!(BurstGeometry::new(10.0, 0.0, 500.0).is_ok());
    }

    #[test]
    fn test_burst_kind_exact_zero() {
        assert_eq!(BurstKind::from_height(0.0), BurstKind::Surface);
        assert_eq!(BurstKind::from_height(1e-9), BurstKind::Air);
        assert!(BurstKind::Surface.is_surface());
    }
}
