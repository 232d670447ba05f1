//! Air blast: peak overpressure, dynamic pressure, arrival time, positive phase
//!
//! # References
//! - Kingery, C.N., Bulmash, G. (1984). "Airblast parameters from TNT spherical air burst
//!   and hemispherical surface burst." ARBRL-TR-02555, US Army BRL.
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons", 3rd ed.
//! - Dewey, J.M. (1964). "The air velocity in blast waves from TNT explosions."
//!   Proc. Royal Society A, 279, 366-385.
//! - Kinney, G.F., Graham, K.J. (1985). "Explosive Shocks in Air", 2nd ed. Springer.
//!
//! # Regime Selection
//!
//! Peak overpressure is a piecewise fit in `L = log10(Z)`:
//!
//! | Z (m/kg^⅓)   | log10(P / psi)                               |
//! |--------------|----------------------------------------------|
//! | ≤ 0.035      | saturated at 6.7×10⁴ psi                     |
//! | (0.035, 0.1] | 4.54 − 3.10 L + 0.155 L²                     |
//! | (0.1, 1]     | 4.21 − 2.10 L − 0.340 L² + 0.066 L³          |
//! | (1, 10]      | 3.71 − 0.920 L − 0.096 L² + 0.016 L³         |
//! | > 10         | 1.5 − 1.85 L                                 |
//!
//! The fits jump at their breakpoints (by ~78× at Z = 0.1) and the close-in
//! fits exceed the saturation value. The saturation value is applied as a
//! ceiling on every regime so overpressure never rises with range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::units::{Kilopascals, Psi};
use crate::physics::scaling::{BurstGeometry, BurstKind};

/// Overpressure ceiling of the close-in fit
pub const SATURATION_OVERPRESSURE: Psi = Psi::new(6.7e4);

/// Peak overpressure above which the strong-shock dynamic pressure branch applies
pub const DYNAMIC_PRESSURE_BRANCH: Psi = Psi::new(10.0);

/// Piecewise regime of the Kingery-Bulmash overpressure fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverpressureRegime {
    /// Z ≤ 0.035: fireball contact, fixed saturation value
    Saturated,
    /// 0.035 < Z ≤ 0.1
    CloseIn,
    /// 0.1 < Z ≤ 1
    Near,
    /// 1 < Z ≤ 10
    Intermediate,
    /// Z > 10
    Far,
}

impl OverpressureRegime {
    /// Upper breakpoints (inclusive) of each fitted regime, in order
    pub const BREAKPOINTS: [f64; 4] = [0.035, 0.1, 1.0, 10.0];

    /// Select the regime for a scaled distance
    pub fn from_scaled_distance(z: f64) -> Self {
        let [saturated, close_in, near, intermediate] = Self::BREAKPOINTS;
        if z <= saturated {
            Self::Saturated
        } else if z <= close_in {
            Self::CloseIn
        } else if z <= near {
            Self::Near
        } else if z <= intermediate {
            Self::Intermediate
        } else {
            Self::Far
        }
    }

    /// Polynomial coefficients `[c0, c1, c2, c3]` of `log10(P_psi)` in `log10(Z)`
    ///
    /// `None` for the saturated regime, which has no fit.
    pub const fn coefficients(self) -> Option<[f64; 4]> {
        match self {
            Self::Saturated => None,
            Self::CloseIn => Some([4.54, -3.10, 0.155, 0.0]),
            Self::Near => Some([4.21, -2.10, -0.340, 0.066]),
            Self::Intermediate => Some([3.71, -0.920, -0.096, 0.016]),
            Self::Far => Some([1.5, -1.85, 0.0, 0.0]),
        }
    }
}

/// Raw Kingery-Bulmash fit at scaled distance `z`, without the saturation ceiling
///
/// Exposed so breakpoint discontinuities can be inspected directly.
pub fn overpressure_fit(z: f64) -> Psi {
    let regime = OverpressureRegime::from_scaled_distance(z);
    match regime.coefficients() {
        None => SATURATION_OVERPRESSURE,
        Some([c0, c1, c2, c3]) => {
            let log_z = z.log10();
            let log_p = c0 + log_z * (c1 + log_z * (c2 + log_z * c3));
            Psi::new(10f64.powf(log_p))
        }
    }
}

/// Peak overpressure in psi, capped at [`SATURATION_OVERPRESSURE`]
pub fn peak_overpressure_psi(geometry: &BurstGeometry) -> Psi {
    let z = geometry.scaled_distance();
    let fit = overpressure_fit(z);
    debug!(
        z,
        regime = ?OverpressureRegime::from_scaled_distance(z),
        fit_psi = *fit,
        "overpressure regime"
    );
    Psi::new(fit.min(*SATURATION_OVERPRESSURE))
}

/// Peak overpressure (kPa)
pub fn peak_overpressure(geometry: &BurstGeometry) -> Kilopascals {
    peak_overpressure_psi(geometry).to_kilopascals()
}

/// Dynamic pressure behind a shock of the given peak overpressure
///
/// # Formula
/// ```text
/// q = 2.5 P² / (P + 7 P₀)        P > 10 psi  (Rankine-Hugoniot, γ = 1.4)
/// q = 5 P² / (2 (P + 7 P₀))      P ≤ 10 psi  (Brode low-pressure form)
/// ```
///
/// The two forms are algebraically identical; both branches are kept so the
/// 10 psi breakpoint stays explicit.
pub fn dynamic_pressure_from_overpressure(overpressure: Kilopascals) -> Kilopascals {
    let ambient = *Kilopascals::SEA_LEVEL.to_psi();
    let p = *overpressure.to_psi();

    let q = if p > *DYNAMIC_PRESSURE_BRANCH {
        2.5 * p * p / (p + 7.0 * ambient)
    } else {
        (5.0 * p * p) / (2.0 * (p + 7.0 * ambient))
    };

    Psi::new(q).to_kilopascals()
}

/// Dynamic pressure (kPa)
pub fn dynamic_pressure(geometry: &BurstGeometry) -> Kilopascals {
    dynamic_pressure_from_overpressure(peak_overpressure(geometry))
}

/// Shock arrival time (s), Dewey's approximation
///
/// ```text
/// t_ms = 1.56 W^(1/3) Z (1 + c)
/// c = 0.019 / Z^0.8   Z < 1
/// c = 0.029 / Z^0.5   Z ≥ 1
/// ```
pub fn arrival_time(geometry: &BurstGeometry) -> f64 {
    let z = geometry.scaled_distance();
    let correction = if z < 1.0 {
        0.019 / z.powf(0.8)
    } else {
        0.029 / z.sqrt()
    };

    let t_ms = 1.56 * geometry.cube_root_yield() * z * (1.0 + correction);
    t_ms * 0.001
}

/// Positive phase duration (s), Kinney-Graham approximation
///
/// ```text
/// surface: t = 1.35e-3 √W (d / W^(1/3))^0.8
/// air:     t = 1.65e-3 W^(1/3) (R_slant / W^(1/3))^0.6
/// ```
///
/// The branch follows [`BurstGeometry::burst`]; it is never inferred from a
/// float comparison here.
pub fn positive_phase_duration(geometry: &BurstGeometry) -> f64 {
    let w = geometry.yield_kg();
    let w_cbrt = geometry.cube_root_yield();

    match geometry.burst() {
        BurstKind::Surface => {
            let ground_range = *geometry.ground_range();
            1.35e-3 * w.sqrt() * (ground_range / w_cbrt).powf(0.8)
        }
        BurstKind::Air => {
            let slant_range = *geometry.slant_range();
            1.65e-3 * w_cbrt * (slant_range / w_cbrt).powf(0.6)
        }
    }
}

/// Blast quantities at one observation point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastResult {
    /// Peak overpressure (kPa)
    pub overpressure_kpa: f64,
    /// Peak dynamic pressure (kPa)
    pub dynamic_pressure_kpa: f64,
    /// Shock arrival time (s)
    pub arrival_time_s: f64,
    /// Positive phase duration (s)
    pub positive_phase_duration_s: f64,
}

impl BlastResult {
    /// Evaluate all blast quantities for a geometry
    pub fn evaluate(geometry: &BurstGeometry) -> Self {
        let overpressure = peak_overpressure(geometry);
        Self {
            overpressure_kpa: *overpressure,
            dynamic_pressure_kpa: *dynamic_pressure_from_overpressure(overpressure),
            arrival_time_s: arrival_time(geometry),
            positive_phase_duration_s: positive_phase_duration(geometry),
        }
    }
}
