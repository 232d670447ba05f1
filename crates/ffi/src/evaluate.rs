/// FFI entry point for scalar effect evaluation.
use blast_effects_core::{assess, EffectsConfig, EffectsReport, Scenario};

use crate::error::{BlastEffectsErrorCode, DefaultBlastEffectsError};
use crate::helpers::{track_error, track_result};
use crate::scenario::{BlastConfig, BlastScenario};

/// C-compatible scalar effects at one observation point.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlastEffects {
    /// Scaled distance Z (m/kg^(1/3))
    pub scaled_distance: f64,
    /// Peak overpressure (kPa)
    pub overpressure_kpa: f64,
    /// Peak dynamic pressure (kPa)
    pub dynamic_pressure_kpa: f64,
    /// Shock arrival time (seconds)
    pub arrival_time_sec: f64,
    /// Positive phase duration (seconds)
    pub positive_phase_duration_sec: f64,
    /// Thermal fluence (cal/cm²)
    pub thermal_cal_per_cm2: f64,
    /// Ignition probability of the configured material (0-1)
    pub ignition_probability: f64,
    /// Prompt radiation dose (Sv)
    pub prompt_radiation_sv: f64,
    /// Residual dose rate (Sv/h)
    pub residual_radiation_sv_per_h: f64,
}

impl From<&EffectsReport> for BlastEffects {
    fn from(report: &EffectsReport) -> Self {
        Self {
            scaled_distance: report.scaled_distance,
            overpressure_kpa: report.blast.overpressure_kpa,
            dynamic_pressure_kpa: report.blast.dynamic_pressure_kpa,
            arrival_time_sec: report.blast.arrival_time_s,
            positive_phase_duration_sec: report.blast.positive_phase_duration_s,
            thermal_cal_per_cm2: report.thermal.fluence_cal_per_cm2,
            ignition_probability: report.thermal.ignition_probability,
            prompt_radiation_sv: report.radiation.prompt_dose_sv,
            residual_radiation_sv_per_h: report.radiation.residual_dose_rate_sv_per_h,
        }
    }
}

/// Evaluate blast, thermal and radiation effects for one scenario.
///
/// Parameters
/// - `scenario`: Scenario to evaluate. Must be non-null.
/// - `config`: Model configuration, or null for defaults.
/// - `out_effects`: Receives the results. Must be non-null; zeroed on failure.
///
/// Returns
/// - `BlastEffectsErrorCode::Ok` (0) on success
/// - `BlastEffectsErrorCode::NullPointer` if `scenario` or `out_effects` is null
/// - `BlastEffectsErrorCode::InvalidScenario` for out-of-domain inputs
/// - `BlastEffectsErrorCode::NumericDegenerate` for a surface burst observed at ground zero
///
/// # Safety
/// - `scenario` must point to a valid `BlastScenario`.
/// - `config` must be null or point to a valid `BlastConfig`.
/// - `out_effects` must point to writable memory for one `BlastEffects`.
///
/// Example (C)
/// ```c
/// BlastScenario scenario = blast_effects_default_scenario();
/// scenario.yield_kt = 20.0;
/// scenario.distance_m = 1000.0;
/// BlastEffects effects;
/// if (blast_effects_evaluate(&scenario, NULL, &effects) == Ok) {
///     printf("%.1f kPa\n", effects.overpressure_kpa);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn blast_effects_evaluate(
    scenario: *const BlastScenario,
    config: *const BlastConfig,
    out_effects: *mut BlastEffects,
) -> BlastEffectsErrorCode {
    if out_effects.is_null() {
        return track_error(&DefaultBlastEffectsError::null_pointer("out_effects"));
    }
    if scenario.is_null() {
        unsafe {
            *out_effects = BlastEffects::default();
        }
        return track_error(&DefaultBlastEffectsError::null_pointer("scenario"));
    }

    // SAFETY: non-null and valid per the caller contract
    let scenario = Scenario::from(unsafe { *scenario });
    let config = if config.is_null() {
        EffectsConfig::default()
    } else {
        EffectsConfig::from(unsafe { *config })
    };

    match track_result(assess(&scenario, &config)) {
        Ok(report) => {
            unsafe {
                *out_effects = BlastEffects::from(&report);
            }
            BlastEffectsErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_effects = BlastEffects::default();
            }
            code
        }
    }
}
