/// C-compatible scenario and configuration types.
///
/// Plain `#[repr(C)]` value structs mirroring the core `Scenario` and
/// `EffectsConfig`. Fill them from the defaults functions and override fields.
use blast_effects_core::{EffectsConfig, FalloutGrid, Material, Scenario};

/// C-compatible scenario: one explosion and one observation point.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastScenario {
    /// Yield (kilotons TNT, > 0)
    pub yield_kt: f64,
    /// Ground distance from ground zero (meters, >= 0)
    pub distance_m: f64,
    /// Height of burst (meters, >= 0)
    pub burst_height_m: f64,
    /// Time after explosion for the residual dose rate (hours, > 0)
    pub time_after_explosion_h: f64,
    /// Wind speed (m/s, >= 0)
    pub wind_speed_ms: f64,
    /// Wind direction (degrees)
    pub wind_direction_deg: f64,
    /// Burst latitude (degrees, strictly inside -90..90)
    pub latitude: f64,
    /// Burst longitude (degrees)
    pub longitude: f64,
}

impl From<BlastScenario> for Scenario {
    fn from(s: BlastScenario) -> Self {
        Scenario::new(s.yield_kt, s.distance_m)
            .with_burst_height(s.burst_height_m)
            .with_time_after_explosion(s.time_after_explosion_h)
            .with_wind(s.wind_speed_ms, s.wind_direction_deg)
            .with_location(s.latitude, s.longitude)
    }
}

impl From<Scenario> for BlastScenario {
    fn from(s: Scenario) -> Self {
        Self {
            yield_kt: s.yield_kt,
            distance_m: s.distance_m,
            burst_height_m: s.burst_height_m,
            time_after_explosion_h: s.time_after_explosion_h,
            wind_speed_ms: s.wind_speed_ms,
            wind_direction_deg: s.wind_direction_deg,
            latitude: s.latitude,
            longitude: s.longitude,
        }
    }
}

/// Ignition target material.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlastMaterial {
    /// Dry wood
    Wood = 0,
    /// Fabrics
    Fabric = 1,
    /// Generic combustibles
    Other = 2,
}

impl From<BlastMaterial> for Material {
    fn from(material: BlastMaterial) -> Self {
        match material {
            BlastMaterial::Wood => Material::Wood,
            BlastMaterial::Fabric => Material::Fabric,
            BlastMaterial::Other => Material::Other,
        }
    }
}

impl From<Material> for BlastMaterial {
    fn from(material: Material) -> Self {
        match material {
            Material::Wood => BlastMaterial::Wood,
            Material::Fabric => BlastMaterial::Fabric,
            Material::Other => BlastMaterial::Other,
        }
    }
}

/// C-compatible model configuration.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastConfig {
    /// Atmospheric transmissivity (0-1)
    pub transmissivity: f64,
    /// Fission fraction of yield (0-1)
    pub fission_fraction: f64,
    /// Rainout enhancement (clamped to 1-3)
    pub rainout_factor: f64,
    /// Ignition target material
    pub material: BlastMaterial,
    /// Fallout samples per side (2-500)
    pub fallout_resolution: u32,
    /// Fallout grid half-width (meters)
    pub fallout_radius_m: f64,
}

impl From<BlastConfig> for EffectsConfig {
    fn from(c: BlastConfig) -> Self {
        EffectsConfig {
            transmissivity: c.transmissivity,
            fission_fraction: c.fission_fraction,
            rainout_factor: c.rainout_factor,
            material: c.material.into(),
            fallout_grid: FalloutGrid::new(c.fallout_resolution as usize, c.fallout_radius_m),
        }
    }
}

impl From<EffectsConfig> for BlastConfig {
    fn from(c: EffectsConfig) -> Self {
        Self {
            transmissivity: c.transmissivity,
            fission_fraction: c.fission_fraction,
            rainout_factor: c.rainout_factor,
            material: c.material.into(),
            fallout_resolution: u32::try_from(c.fallout_grid.resolution).unwrap_or(u32::MAX),
            fallout_radius_m: c.fallout_grid.radius_m,
        }
    }
}

/// Scenario with default weather, location and timing (1 kt, ground zero).
///
/// Set at least `yield_kt` and `distance_m` before evaluating.
#[no_mangle]
pub extern "C" fn blast_effects_default_scenario() -> BlastScenario {
    Scenario::default().into()
}

/// Default model configuration (transmissivity 0.7, fission 0.5, wood, 100x100 fallout grid).
#[no_mangle]
pub extern "C" fn blast_effects_default_config() -> BlastConfig {
    EffectsConfig::default().into()
}
