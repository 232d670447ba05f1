//! Scenario description for a single point explosion

use serde::{Deserialize, Serialize};

use crate::error::{
    require_finite, require_non_negative, require_positive, EffectsError, EffectsResult,
};
use crate::physics::scaling::{BurstGeometry, BurstKind};

/// Parameters of one explosion and one observation point
///
/// Plain value type: every evaluation recomputes from these fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Yield in kilotons of TNT equivalent (> 0)
    pub yield_kt: f64,
    /// Horizontal ground distance from ground zero (m, >= 0)
    pub distance_m: f64,
    /// Height of detonation above ground (m, >= 0)
    pub burst_height_m: f64,
    /// Explicit surface/air burst selection; `None` derives it from the height
    pub surface_burst: Option<bool>,
    /// Wind speed (m/s, >= 0)
    pub wind_speed_ms: f64,
    /// Wind direction (degrees, meteorological convention)
    pub wind_direction_deg: f64,
    /// Burst latitude (decimal degrees)
    pub latitude: f64,
    /// Burst longitude (decimal degrees)
    pub longitude: f64,
    /// Time after explosion for residual dose decay (hours, > 0)
    pub time_after_explosion_h: f64,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            yield_kt: 1.0,
            distance_m: 0.0,
            burst_height_m: 0.0,
            surface_burst: None,
            wind_speed_ms: 5.0,
            wind_direction_deg: 90.0,
            latitude: 0.0,
            longitude: 0.0,
            time_after_explosion_h: 1.0,
        }
    }
}

impl Scenario {
    /// Create a surface burst scenario with default weather and location
    pub fn new(yield_kt: f64, distance_m: f64) -> Self {
        Self {
            yield_kt,
            distance_m,
            ..Self::default()
        }
    }

    /// Set the height of burst
    pub fn with_burst_height(mut self, burst_height_m: f64) -> Self {
        self.burst_height_m = burst_height_m;
        self
    }

    /// Force surface (`true`) or air (`false`) burst formulas
    pub fn with_surface_burst(mut self, surface_burst: bool) -> Self {
        self.surface_burst = Some(surface_burst);
        self
    }

    /// Set wind speed (m/s) and direction (degrees)
    pub fn with_wind(mut self, speed_ms: f64, direction_deg: f64) -> Self {
        self.wind_speed_ms = speed_ms;
        self.wind_direction_deg = direction_deg;
        self
    }

    /// Set the burst location
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Set the time after explosion (hours)
    pub fn with_time_after_explosion(mut self, hours: f64) -> Self {
        self.time_after_explosion_h = hours;
        self
    }

    /// Surface or air burst branch for this scenario
    pub fn burst_kind(&self) -> BurstKind {
        match self.surface_burst {
            Some(true) => BurstKind::Surface,
            Some(false) => BurstKind::Air,
            None => BurstKind::from_height(self.burst_height_m),
        }
    }

    /// Wind direction folded into `[0, 360)`
    pub fn wind_direction_normalized(&self) -> f64 {
        self.wind_direction_deg.rem_euclid(360.0)
    }

    /// Validated burst geometry (yield, ranges, burst kind)
    ///
    /// # Errors
    /// See [`BurstGeometry::new`].
    pub fn burst_geometry(&self) -> EffectsResult<BurstGeometry> {
        Ok(
            BurstGeometry::new(self.yield_kt, self.distance_m, self.burst_height_m)?
                .with_burst_kind(self.burst_kind()),
        )
    }

    /// Check every field against its physical domain
    ///
    /// # Errors
    /// Returns [`EffectsError::InvalidScenario`] naming the first offending field.
    pub fn validate(&self) -> EffectsResult<()> {
        require_positive("yield", self.yield_kt)?;
        require_non_negative("distance", self.distance_m)?;
        require_non_negative("burst_height", self.burst_height_m)?;
        require_non_negative("wind_speed", self.wind_speed_ms)?;
        require_finite("wind_direction", self.wind_direction_deg)?;
        require_positive("time_after_explosion", self.time_after_explosion_h)?;
        self.validate_location()
    }

    /// Check latitude and longitude
    ///
    /// Latitude must stay strictly inside the poles: the flat-Earth mapping
    /// divides by `cos(latitude)`.
    ///
    /// # Errors
    /// Returns [`EffectsError::InvalidScenario`] for a non-finite longitude or a
    /// latitude outside `(-90, 90)`.
    pub fn validate_location(&self) -> EffectsResult<()> {
        require_finite("longitude", self.longitude)?;
        if !(self.latitude.is_finite() && self.latitude.abs() < 90.0) {
            return Err(EffectsError::invalid(
                "latitude",
                format!("must lie strictly inside (-90, 90), got {}", self.latitude),
            ));
        }
        Ok(())
    }
}
