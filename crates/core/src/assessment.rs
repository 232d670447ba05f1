//! Whole-scenario evaluation
//!
//! Validates a [`Scenario`] and [`EffectsConfig`] once, then runs every
//! scalar model against the same [`BurstGeometry`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::config::EffectsConfig;
use crate::core_types::scenario::Scenario;
use crate::effects::{BlastSeverity, RadiationSeverity, ThermalSeverity};
use crate::error::{require_finite_output, EffectsResult};
use crate::physics::blast::BlastResult;
use crate::physics::fallout::{fallout_pattern, FalloutField};
use crate::physics::radiation::RadiationResult;
use crate::physics::scaling::BurstGeometry;
use crate::physics::thermal::ThermalResult;

/// Every scalar effect at one observation point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectsReport {
    /// Scenario the report was computed for
    pub scenario: Scenario,
    /// Scaled distance Z (m/kg^(1/3))
    pub scaled_distance: f64,
    /// Blast quantities
    pub blast: BlastResult,
    /// Thermal quantities
    pub thermal: ThermalResult,
    /// Radiation quantities
    pub radiation: RadiationResult,
}

impl EffectsReport {
    /// Structural damage tier
    pub fn blast_severity(&self) -> BlastSeverity {
        BlastSeverity::from_overpressure(self.blast.overpressure_kpa)
    }

    /// Burn severity tier
    pub fn thermal_severity(&self) -> ThermalSeverity {
        ThermalSeverity::from_fluence(self.thermal.fluence_cal_per_cm2)
    }

    /// Acute radiation tier
    pub fn radiation_severity(&self) -> RadiationSeverity {
        RadiationSeverity::from_dose(self.radiation.prompt_dose_sv)
    }

    fn ensure_finite(&self) -> EffectsResult<()> {
        let quantities = [
            ("scaled_distance", self.scaled_distance),
            ("overpressure", self.blast.overpressure_kpa),
            ("dynamic_pressure", self.blast.dynamic_pressure_kpa),
            ("arrival_time", self.blast.arrival_time_s),
            ("positive_phase_duration", self.blast.positive_phase_duration_s),
            ("thermal_fluence", self.thermal.fluence_cal_per_cm2),
            ("ignition_probability", self.thermal.ignition_probability),
            ("prompt_dose", self.radiation.prompt_dose_sv),
            ("residual_dose_rate", self.radiation.residual_dose_rate_sv_per_h),
        ];
        for (quantity, value) in quantities {
            require_finite_output(quantity, value)?;
        }
        Ok(())
    }
}

/// Evaluate blast, thermal and radiation effects for a scenario
///
/// # Errors
/// - [`crate::EffectsError::InvalidScenario`] for any out-of-domain field
/// - [`crate::EffectsError::NumericDegenerate`] for a zero slant range, or when
///   an extreme yield or distance overflows any reported quantity
pub fn assess(scenario: &Scenario, config: &EffectsConfig) -> EffectsResult<EffectsReport> {
    scenario.validate()?;
    config.validate()?;

    let geometry: BurstGeometry = scenario.burst_geometry()?;
    let scaled_distance = geometry.scaled_distance();
    debug!(
        yield_kt = scenario.yield_kt,
        distance_m = scenario.distance_m,
        burst = ?geometry.burst(),
        scaled_distance,
        "assessing scenario"
    );

    let report = EffectsReport {
        scenario: *scenario,
        scaled_distance,
        blast: BlastResult::evaluate(&geometry),
        thermal: ThermalResult::evaluate(&geometry, config.transmissivity, config.material),
        radiation: RadiationResult::evaluate(
            &geometry,
            scenario.time_after_explosion_h,
            config.fission_fraction,
            scenario.wind_speed_ms,
            config.rainout_factor,
        )?,
    };
    report.ensure_finite()?;
    Ok(report)
}

/// Build the fallout field for a scenario on the configured grid
///
/// # Errors
/// See [`fallout_pattern`].
pub fn assess_fallout(scenario: &Scenario, config: &EffectsConfig) -> EffectsResult<FalloutField> {
    config.validate()?;
    fallout_pattern(scenario, &config.fallout_grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EffectsError;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_report() {
        let report = assess(&Scenario::new(20.0, 1000.0), &EffectsConfig::default()).unwrap();
        assert_relative_eq!(report.scaled_distance, 3.6840314986403877, max_relative = 1e-12);
        assert_relative_eq!(report.blast.overpressure_kpa, 9991.219049921907, max_relative = 1e-9);
        assert_relative_eq!(
            report.thermal.fluence_cal_per_cm2,
            38.99296105751435,
            max_relative = 1e-9
        );
        assert_relative_eq!(report.radiation.prompt_dose_sv, 6.52014e-07, max_relative = 1e-9);
        assert_relative_eq!(
            report.radiation.residual_dose_rate_sv_per_h,
            0.06666666666666667,
            max_relative = 1e-9
        );
        assert_eq!(report.blast_severity(), BlastSeverity::TotalDestruction);
        assert_eq!(report.thermal_severity(), ThermalSeverity::SecondDegree);
        assert_eq!(report.radiation_severity(), RadiationSeverity::Minimal);
    }

    #[test]
    fn test_ground_zero_surface_burst_rejected() {
        let result = assess(&Scenario::new(20.0, 0.0), &EffectsConfig::default());
        assert!(matches!(result, Err(EffectsError::NumericDegenerate { .. })));
    }

    #[test]
    fn test_overflowing_yield_is_degenerate() {
        let err = assess(&Scenario::new(1e300, 1000.0), &EffectsConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "numeric_degenerate");
    }

    #[test]
    fn test_underflowing_distance_is_degenerate() {
        let err = assess(&Scenario::new(20.0, 1e-170), &EffectsConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "numeric_degenerate");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EffectsConfig {
            fission_fraction: 1.5,
            ..EffectsConfig::default()
        };
        assert!(assess(&Scenario::new(20.0, 1000.0), &config).is_err());
    }

    #[test]
    fn test_fallout_uses_configured_grid() {
        let mut config = EffectsConfig::default();
        config.fallout_grid.resolution = 40;
        let scenario = Scenario::new(10.0, 0.0).with_burst_height(300.0);
        let field = assess_fallout(&scenario, &config).unwrap();
        assert_eq!(field.resolution(), 40);
    }
}
