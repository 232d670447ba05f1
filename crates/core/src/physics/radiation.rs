//! Prompt and residual ionizing radiation dose
//!
//! # References
//! - Glasstone, S., Dolan, P.J. (1977). "The Effects of Nuclear Weapons", ch. VIII-IX.
//! - ICRP Publication 103 (2007), neutron radiation weighting.
//! - Way, K., Wigner, E.P. (1948). "The rate of decay of fission products."
//!   Physical Review 73, 1318 (t^-1.2 decay law).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::units::{Kilotons, Meters};
use crate::error::{require_positive, EffectsResult};
use crate::physics::scaling::BurstGeometry;

/// Prompt neutron output per kiloton of fission yield at unit slant range
pub const NEUTRON_OUTPUT: f64 = 3.2e10;

/// Prompt gamma output per kiloton of fission yield at unit slant range
pub const GAMMA_OUTPUT: f64 = 8.7e10;

/// Neutron radiation weighting factor
pub const NEUTRON_WEIGHTING: f64 = 10.0;

/// Conversion from fluence-equivalent units to Sv
pub const DOSE_CONVERSION: f64 = 1.602e-13;

/// Residual dose rate at H+1 per kiloton of fission yield, before unit conversion
pub const RESIDUAL_SOURCE: f64 = 1.0e4;

/// Way-Wigner decay exponent
pub const DECAY_EXPONENT: f64 = 1.2;

/// Accepted range of the rainout enhancement
pub const RAINOUT_RANGE: (f64, f64) = (1.0, 3.0);

/// Prompt (neutron + gamma) dose at the observer (Sv)
///
/// # Formula
/// ```text
/// n = 3.2e10 f Y / R²
/// γ = 8.7e10 f Y / R²
/// D = (10 n + γ) × 1.602e-13
/// ```
pub fn prompt_radiation_dose(geometry: &BurstGeometry, fission_fraction: f64) -> f64 {
    let fission_yield = fission_fraction * *geometry.yield_kt();
    let slant_range = *geometry.slant_range();
    let range_sq = slant_range * slant_range;

    let neutron = NEUTRON_OUTPUT * fission_yield / range_sq;
    let gamma = GAMMA_OUTPUT * fission_yield / range_sq;

    neutron * NEUTRON_WEIGHTING * DOSE_CONVERSION + gamma * DOSE_CONVERSION
}

/// Residual (fallout) dose rate at ground range and time after burst (Sv/h)
///
/// # Formula
/// ```text
/// base  = 1e4 f Y / t^1.2
/// rate  = base × (1 / d_km²) × 1 / (1 + 0.1 u) × clamp(r, 1, 3) × 1e-6
/// ```
///
/// At ground zero (`d = 0`) the distance factor is 1 instead of diverging.
///
/// # Arguments
/// * `yield_kt` - Total yield
/// * `distance` - Ground range from ground zero
/// * `time_after_explosion_h` - Hours since detonation (> 0)
/// * `fission_fraction` - Fraction of yield from fission
/// * `wind_speed_ms` - Wind speed (m/s), dilutes local deposition
/// * `rainout_factor` - Precipitation enhancement, clamped to [`RAINOUT_RANGE`]
///
/// # Errors
/// [`crate::EffectsError::InvalidScenario`] if `time_after_explosion_h` is not
/// finite and positive.
pub fn residual_radiation_dose(
    yield_kt: Kilotons,
    distance: Meters,
    time_after_explosion_h: f64,
    fission_fraction: f64,
    wind_speed_ms: f64,
    rainout_factor: f64,
) -> EffectsResult<f64> {
    let hours = require_positive("time_after_explosion", time_after_explosion_h)?;

    let base_rate = RESIDUAL_SOURCE * fission_fraction * *yield_kt / hours.powf(DECAY_EXPONENT);

    let distance_km = distance.to_kilometers();
    let distance_factor = if distance_km > 0.0 {
        1.0 / (distance_km * distance_km)
    } else {
        debug!("residual dose at ground zero, distance factor fixed at 1");
        1.0
    };

    let wind_factor = 1.0 / (1.0 + 0.1 * wind_speed_ms);
    let (rain_min, rain_max) = RAINOUT_RANGE;
    let rainout = rainout_factor.clamp(rain_min, rain_max);

    Ok(base_rate * distance_factor * wind_factor * rainout * 1e-6)
}

/// Radiation quantities at one observation point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiationResult {
    /// Prompt dose (Sv)
    pub prompt_dose_sv: f64,
    /// Residual dose rate (Sv/h)
    pub residual_dose_rate_sv_per_h: f64,
}

impl RadiationResult {
    /// Evaluate prompt dose and residual dose rate
    ///
    /// # Errors
    /// See [`residual_radiation_dose`].
    pub fn evaluate(
        geometry: &BurstGeometry,
        time_after_explosion_h: f64,
        fission_fraction: f64,
        wind_speed_ms: f64,
        rainout_factor: f64,
    ) -> EffectsResult<Self> {
        Ok(Self {
            prompt_dose_sv: prompt_radiation_dose(geometry, fission_fraction),
            residual_dose_rate_sv_per_h: residual_radiation_dose(
                geometry.yield_kt(),
                geometry.ground_range(),
                time_after_explosion_h,
                fission_fraction,
                wind_speed_ms,
                rainout_factor,
            )?,
        })
    }
}
