//! Fallout contamination field
//!
//! Synthesizes a wind-aligned anisotropic Gaussian plume on a square local
//! grid and maps it to geographic coordinates.
//!
//! # Algorithm
//!
//! 1. Sample `n × n` points over `[-radius, radius]²` (east, north) in meters.
//! 2. Rotate coordinates by the wind direction.
//! 3. Evaluate an uncorrelated 2D Gaussian with spreads
//!    `σ_east = 0.2 u (h/1000) r`, `σ_north = 0.1 u (h/1000) r`, each floored at `r/100`.
//! 4. Rescale so the samples sum to `Y × 1e15` Bq, then express in kBq/m² (÷ 1000).
//! 5. Map to longitude/latitude with the flat-Earth approximation
//!    (1° ≈ 111 km, longitude scaled by `cos(latitude)`).
//!
//! # Storage Layout
//!
//! Struct-of-arrays, row-major. Row `i` is the north axis (`y = -r + i·Δ`),
//! column `j` the east axis (`x = -r + j·Δ`), so longitude is the
//! fast-varying axis and `value[i * n + j]` is the sample at `(x_j, y_i)`.
//!
//! # Normalization
//!
//! The rescale uses the discrete sample sum, not the continuous integral of
//! the density. The sum therefore matches the total activity exactly at any
//! resolution, while the per-cell values approximate the areal density less
//! accurately as resolution falls.

use nalgebra::{Rotation2, Vector2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::config::FalloutGrid;
use crate::core_types::scenario::Scenario;
use crate::error::{require_finite_output, EffectsError, EffectsResult};

/// Released activity per kiloton of yield (Bq)
pub const ACTIVITY_PER_KILOTON: f64 = 1.0e15;

/// Bq per kBq
pub const BECQUERELS_PER_KILOBECQUEREL: f64 = 1000.0;

/// Length of one degree of latitude (m)
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Samples below this value (kBq/m²) are omitted from display sampling
pub const DISPLAY_THRESHOLD: f64 = 0.1;

/// Plume standard deviations along the local axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeSpread {
    /// Spread along the east axis (m)
    pub sigma_east_m: f64,
    /// Spread along the north axis (m)
    pub sigma_north_m: f64,
}

impl PlumeSpread {
    /// Wind- and height-driven spread, floored at `radius / 100`
    pub fn new(wind_speed_ms: f64, burst_height_m: f64, radius_m: f64) -> Self {
        let drive = wind_speed_ms * (burst_height_m / 1000.0) * radius_m;
        let floor = radius_m / 100.0;

        let spread = Self {
            sigma_east_m: (0.2 * drive).max(floor),
            sigma_north_m: (0.1 * drive).max(floor),
        };
        if spread.sigma_north_m == floor {
            debug!(floor_m = floor, "plume spread floored");
        }
        spread
    }

    /// Uncorrelated bivariate normal density at rotated coordinates
    #[inline]
    pub fn density(&self, rotated: &Vector2<f64>) -> f64 {
        let (sx, sy) = (self.sigma_east_m, self.sigma_north_m);
        let exponent =
            rotated.x * rotated.x / (2.0 * sx * sx) + rotated.y * rotated.y / (2.0 * sy * sy);
        (-exponent).exp() / (2.0 * std::f64::consts::PI * sx * sy)
    }
}

/// One geolocated contamination sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloutSample {
    /// Longitude (degrees)
    pub longitude: f64,
    /// Latitude (degrees)
    pub latitude: f64,
    /// Contamination (kBq/m²)
    pub contamination: f64,
}

/// Gridded fallout field: three parallel row-major channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloutField {
    resolution: usize,
    spread: PlumeSpread,
    longitude: Vec<f64>,
    latitude: Vec<f64>,
    contamination: Vec<f64>,
}

impl FalloutField {
    /// Samples per side
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Plume spread used to build the field
    pub fn spread(&self) -> PlumeSpread {
        self.spread
    }

    /// Longitude channel, row-major
    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Latitude channel, row-major
    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    /// Contamination channel (kBq/m²), row-major
    pub fn contamination(&self) -> &[f64] {
        &self.contamination
    }

    /// Sample at `row` (north index) and `col` (east index)
    pub fn get(&self, row: usize, col: usize) -> Option<FalloutSample> {
        if row >= self.resolution || col >= self.resolution {
            return None;
        }
        Some(self.sample(row * self.resolution + col))
    }

    fn sample(&self, idx: usize) -> FalloutSample {
        FalloutSample {
            longitude: self.longitude[idx],
            latitude: self.latitude[idx],
            contamination: self.contamination[idx],
        }
    }

    /// Split a channel into rows
    pub fn to_nested(&self, channel: &[f64]) -> Vec<Vec<f64>> {
        channel
            .chunks(self.resolution)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Sum of all samples; `Y × 1e12` by construction
    pub fn total_contamination(&self) -> f64 {
        self.contamination.iter().sum()
    }

    /// Most contaminated sample
    pub fn peak(&self) -> Option<FalloutSample> {
        self.contamination
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| self.sample(idx))
    }

    /// Stride used for display sampling: about 50 samples per side
    pub fn display_stride(&self) -> usize {
        (self.resolution / 50).max(1)
    }

    /// Samples above `threshold` on a lattice subsampled every `stride` rows and columns
    pub fn significant_samples(&self, threshold: f64, stride: usize) -> Vec<FalloutSample> {
        let stride = stride.max(1);
        (0..self.resolution)
            .step_by(stride)
            .flat_map(|row| {
                (0..self.resolution)
                    .step_by(stride)
                    .map(move |col| row * self.resolution + col)
            })
            .filter(|&idx| self.contamination[idx] > threshold)
            .map(|idx| self.sample(idx))
            .collect()
    }
}

/// Build the fallout field for a scenario
///
/// Uses the scenario's yield, burst height, wind and location; distance and
/// time after explosion do not enter.
///
/// # Errors
/// - [`EffectsError::InvalidScenario`] for an invalid scenario or grid
/// - [`EffectsError::NumericDegenerate`] if every sample underflows to zero, or
///   the yield is large enough to overflow the deposited activity
///   (plume narrower than the grid spacing) or the sum is not finite
pub fn fallout_pattern(scenario: &Scenario, grid: &FalloutGrid) -> EffectsResult<FalloutField> {
    scenario.validate()?;
    grid.validate()?;

    let n = grid.resolution;
    let spread = PlumeSpread::new(scenario.wind_speed_ms, scenario.burst_height_m, grid.radius_m);
    let rotation = Rotation2::new(scenario.wind_direction_normalized().to_radians());

    let lat0 = scenario.latitude;
    let lon0 = scenario.longitude;
    let meters_per_degree_lon = METERS_PER_DEGREE * lat0.to_radians().cos();

    let mut longitude = vec![0.0; n * n];
    let mut latitude = vec![0.0; n * n];
    let mut contamination = vec![0.0; n * n];

    // Row partial sums, reduced sequentially in row order
    let row_sums: Vec<f64> = longitude
        .par_chunks_mut(n)
        .zip(latitude.par_chunks_mut(n))
        .zip(contamination.par_chunks_mut(n))
        .enumerate()
        .map(|(row, ((lon_row, lat_row), value_row))| {
            let north = grid.axis_coordinate(row);
            let row_lat = lat0 + north / METERS_PER_DEGREE;

            let mut row_sum = 0.0;
            for col in 0..n {
                let east = grid.axis_coordinate(col);
                let rotated = rotation * Vector2::new(east, north);

                lon_row[col] = lon0 + east / meters_per_degree_lon;
                lat_row[col] = row_lat;
                value_row[col] = spread.density(&rotated);
                row_sum += value_row[col];
            }
            row_sum
        })
        .collect();

    let density_sum: f64 = row_sums.iter().sum();
    if !(density_sum.is_finite() && density_sum > 0.0) {
        return Err(EffectsError::degenerate(
            "fallout_density_sum",
            format!(
                "is {density_sum}: plume spread {:.1} m is too narrow for grid spacing {:.1} m",
                spread.sigma_north_m,
                grid.cell_spacing_m()
            ),
        ));
    }

    let total_activity = require_finite_output(
        "fallout_total_activity",
        scenario.yield_kt * ACTIVITY_PER_KILOTON,
    )?;
    let scale = require_finite_output(
        "fallout_scale",
        total_activity / density_sum / BECQUERELS_PER_KILOBECQUEREL,
    )?;
    contamination.par_iter_mut().for_each(|value| *value *= scale);
    if let Some(value) = contamination.iter().find(|value| !value.is_finite()) {
        return Err(EffectsError::degenerate(
            "fallout_contamination",
            format!("evaluated to {value}"),
        ));
    }

    let field = FalloutField {
        resolution: n,
        spread,
        longitude,
        latitude,
        contamination,
    };

    info!(
        resolution = n,
        radius_m = grid.radius_m,
        sigma_east_m = spread.sigma_east_m,
        sigma_north_m = spread.sigma_north_m,
        peak_kbq_m2 = field.peak().map_or(0.0, |s| s.contamination),
        "fallout field synthesized"
    );

    Ok(field)
}
