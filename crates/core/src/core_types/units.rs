//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers for the handful of quantities whose units are easy to
//! confuse in blast-effects work: yield (kilotons vs. kilograms of TNT),
//! pressure (psi fits vs. kPa outputs) and areal energy (J/m² vs. cal/cm²).
//!
//! # Design Philosophy
//! - All types wrap `f64`; the empirical fits are evaluated in log space and
//!   lose precision quickly in `f32`
//! - Explicit conversion methods between related types (`Psi` -> `Kilopascals`)
//! - `Deref` to the raw value for arithmetic inside formulas
//! - Total ordering via `Ord` (NaN sorts greater than all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use blast_effects_core::core_types::units::{Kilopascals, Kilotons, Psi};
//!
//! let yield_kt = Kilotons::new(20.0);
//! assert_eq!(yield_kt.to_kilograms_tnt(), 2.0e7);
//!
//! let pressure: Kilopascals = Psi::new(10.0).into();
//! assert!((*pressure - 68.9476).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// YIELD
// ============================================================================

/// Explosive yield in kilotons of TNT equivalent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilotons(f64);

impl Eq for Kilotons {}

impl PartialOrd for Kilotons {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kilotons {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kilotons {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilotons {
    /// Kilograms of TNT per kiloton (1 kt = 10⁶ kg TNT)
    pub const KILOGRAMS_PER_KILOTON: f64 = 1.0e6;

    /// Energy released per kiloton of TNT (J)
    pub const JOULES_PER_KILOTON: f64 = 4.184e12;

    /// Create a new yield value (unvalidated; see [`crate::BurstGeometry::new`])
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilotons(value)
    }

    /// Convert to kilograms of TNT equivalent
    #[inline]
    #[must_use]
    pub fn to_kilograms_tnt(self) -> f64 {
        self.0 * Self::KILOGRAMS_PER_KILOTON
    }

    /// Total released energy in joules
    #[inline]
    #[must_use]
    pub fn to_joules(self) -> f64 {
        self.0 * Self::JOULES_PER_KILOTON
    }
}

impl From<f64> for Kilotons {
    fn from(v: f64) -> Self {
        Kilotons(v)
    }
}

impl From<Kilotons> for f64 {
    fn from(k: Kilotons) -> f64 {
        k.0
    }
}

impl fmt::Display for Kilotons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kt", self.0)
    }
}

// ============================================================================
// DISTANCE
// ============================================================================

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Zero distance
    pub const ZERO: Meters = Meters(0.0);

    /// Create a new distance
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Convert to kilometers
    #[inline]
    #[must_use]
    pub fn to_kilometers(self) -> f64 {
        self.0 / 1000.0
    }

    /// Euclidean combination with a perpendicular leg (slant range)
    #[inline]
    #[must_use]
    pub fn hypot(self, other: Meters) -> Meters {
        Meters(self.0.hypot(other.0))
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Pressure in pounds per square inch (the unit of the Kingery-Bulmash fits)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Psi(f64);

impl Deref for Psi {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Psi {
    /// Create a new pressure in psi
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Psi(value)
    }

    /// Convert to kilopascals
    #[inline]
    #[must_use]
    pub fn to_kilopascals(self) -> Kilopascals {
        Kilopascals(self.0 * Kilopascals::PER_PSI)
    }
}

impl From<Psi> for Kilopascals {
    fn from(p: Psi) -> Kilopascals {
        p.to_kilopascals()
    }
}

impl fmt::Display for Psi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} psi", self.0)
    }
}

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilopascals(f64);

impl Deref for Kilopascals {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kilopascals {
    /// Kilopascals per psi (fixed conversion factor of the source tables)
    pub const PER_PSI: f64 = 6.89476;

    /// Sea-level standard atmospheric pressure
    pub const SEA_LEVEL: Kilopascals = Kilopascals(101.325);

    /// Create a new pressure in kPa
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilopascals(value)
    }

    /// Convert to psi
    #[inline]
    #[must_use]
    pub fn to_psi(self) -> Psi {
        Psi(self.0 / Self::PER_PSI)
    }
}

impl From<Kilopascals> for Psi {
    fn from(p: Kilopascals) -> Psi {
        p.to_psi()
    }
}

impl fmt::Display for Kilopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kPa", self.0)
    }
}

// ============================================================================
// AREAL ENERGY
// ============================================================================

/// Areal energy density in J/m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct JoulesPerSquareMeter(f64);

impl Deref for JoulesPerSquareMeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl JoulesPerSquareMeter {
    /// Create a new areal energy density
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        JoulesPerSquareMeter(value)
    }

    /// Convert to cal/cm² (1 cal = 4.184 J, 1 m² = 10 000 cm²)
    #[inline]
    #[must_use]
    pub fn to_cal_per_cm2(self) -> CaloriesPerSquareCentimeter {
        CaloriesPerSquareCentimeter(self.0 / CaloriesPerSquareCentimeter::JOULES_PER_M2)
    }
}

/// Areal energy density in cal/cm² (thermal fluence unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CaloriesPerSquareCentimeter(f64);

impl Deref for CaloriesPerSquareCentimeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl CaloriesPerSquareCentimeter {
    /// J/m² in one cal/cm²
    pub const JOULES_PER_M2: f64 = 4.184e4;

    /// Create a new fluence
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        CaloriesPerSquareCentimeter(value)
    }
}

impl From<JoulesPerSquareMeter> for CaloriesPerSquareCentimeter {
    fn from(e: JoulesPerSquareMeter) -> Self {
        e.to_cal_per_cm2()
    }
}

impl fmt::Display for CaloriesPerSquareCentimeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} cal/cm²", self.0)
    }
}
