//! Effect classification, casualty estimates and display formatting
//!
//! Coarse tiers for communicating computed quantities: structural damage by
//! overpressure, burn severity by fluence, acute radiation effects by prompt
//! dose, plus a population-density casualty estimate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EffectsError, EffectsResult};

/// Structural damage tier by peak overpressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlastSeverity {
    /// ≤ 5 kPa
    Minimal,
    /// > 5 kPa
    Minor,
    /// > 20 kPa
    Moderate,
    /// > 50 kPa
    ResidentialCollapse,
    /// > 200 kPa
    ReinforcedCollapse,
    /// > 500 kPa
    TotalDestruction,
}

impl BlastSeverity {
    /// Classify a peak overpressure (kPa)
    pub fn from_overpressure(overpressure_kpa: f64) -> Self {
        match overpressure_kpa {
            p if p > 500.0 => Self::TotalDestruction,
            p if p > 200.0 => Self::ReinforcedCollapse,
            p if p > 50.0 => Self::ResidentialCollapse,
            p if p > 20.0 => Self::Moderate,
            p if p > 5.0 => Self::Minor,
            _ => Self::Minimal,
        }
    }

    /// Human-readable effect description
    pub const fn description(self) -> &'static str {
        match self {
            Self::TotalDestruction => "Total destruction of all structures",
            Self::ReinforcedCollapse => "Reinforced concrete buildings destroyed",
            Self::ResidentialCollapse => "Residential buildings collapse",
            Self::Moderate => "Glass windows shatter, moderate structural damage",
            Self::Minor => "Minor structural damage, broken windows",
            Self::Minimal => "Minimal structural damage",
        }
    }
}

/// Burn severity tier by thermal fluence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalSeverity {
    /// ≤ 5 cal/cm²
    Sunburn,
    /// > 5 cal/cm²
    PainfulBurns,
    /// > 10 cal/cm²
    FirstDegree,
    /// > 25 cal/cm²
    SecondDegree,
    /// > 100 cal/cm²
    ThirdDegree,
}

impl ThermalSeverity {
    /// Classify a thermal fluence (cal/cm²)
    pub fn from_fluence(fluence_cal_per_cm2: f64) -> Self {
        match fluence_cal_per_cm2 {
            q if q > 100.0 => Self::ThirdDegree,
            q if q > 25.0 => Self::SecondDegree,
            q if q > 10.0 => Self::FirstDegree,
            q if q > 5.0 => Self::PainfulBurns,
            _ => Self::Sunburn,
        }
    }

    /// Human-readable effect description
    pub const fn description(self) -> &'static str {
        match self {
            Self::ThirdDegree => "Third-degree burns, spontaneous ignition of materials",
            Self::SecondDegree => "Second-degree burns, clothing ignites",
            Self::FirstDegree => "First-degree burns, flammable materials ignite",
            Self::PainfulBurns => "Painful burns, possible ignition of thin materials",
            Self::Sunburn => "Sunburn-like effects",
        }
    }
}

/// Acute radiation effect tier by prompt dose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiationSeverity {
    /// ≤ 0.5 Sv
    Minimal,
    /// > 0.5 Sv
    TemporarySickness,
    /// > 1 Sv
    Sickness,
    /// > 5 Sv
    Lethal50,
    /// > 10 Sv
    Fatal,
}

impl RadiationSeverity {
    /// Classify a prompt dose (Sv)
    pub fn from_dose(dose_sv: f64) -> Self {
        match dose_sv {
            d if d > 10.0 => Self::Fatal,
            d if d > 5.0 => Self::Lethal50,
            d if d > 1.0 => Self::Sickness,
            d if d > 0.5 => Self::TemporarySickness,
            _ => Self::Minimal,
        }
    }

    /// Human-readable effect description
    pub const fn description(self) -> &'static str {
        match self {
            Self::Fatal => "100% fatal within 48 hours",
            Self::Lethal50 => "50% fatal within 30 days (LD50)",
            Self::Sickness => "Radiation sickness, increased cancer risk",
            Self::TemporarySickness => "Temporary radiation sickness",
            Self::Minimal => "Minimal acute effects",
        }
    }
}

/// Population density class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationDensity {
    /// 10 people/km²
    Rural,
    /// 1 000 people/km²
    Suburban,
    /// 10 000 people/km²
    #[default]
    Urban,
    /// 50 000 people/km²
    Dense,
}

impl PopulationDensity {
    /// People per km²
    pub const fn per_square_kilometer(self) -> f64 {
        match self {
            Self::Rural => 10.0,
            Self::Suburban => 1_000.0,
            Self::Urban => 10_000.0,
            Self::Dense => 50_000.0,
        }
    }

    /// Parse a density class name, case-insensitively
    ///
    /// # Errors
    /// [`EffectsError::InvalidScenario`] for an unknown class name.
    pub fn from_name(name: &str) -> EffectsResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rural" => Ok(Self::Rural),
            "suburban" => Ok(Self::Suburban),
            "urban" => Ok(Self::Urban),
            "dense" => Ok(Self::Dense),
            other => Err(EffectsError::invalid(
                "population",
                format!("unknown density class '{other}'"),
            )),
        }
    }
}

/// Rough casualty estimate inside the observation radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasualtyEstimate {
    /// People inside the disc of radius `distance`
    pub population: u64,
    /// Estimated fatalities
    pub fatalities: u64,
    /// Estimated injuries
    pub injuries: u64,
    /// Fatalities plus injuries, capped at the population
    pub affected: u64,
    /// Fatalities as a percentage of population (0-100)
    pub fatalities_percent: f64,
    /// Injuries as a percentage of population (0-100)
    pub injuries_percent: f64,
}

impl CasualtyEstimate {
    /// Estimate casualties within `distance_m` of ground zero
    ///
    /// # Formula
    /// ```text
    /// N  = ⌊π d² ρ / 1e6⌋
    /// F  = ⌊N × 0.7 (1 − exp(−P/50))⌋
    /// I  = ⌊N × 0.6 (1 − exp(−Q/15))⌋
    /// ```
    pub fn estimate(
        distance_m: f64,
        density: PopulationDensity,
        overpressure_kpa: f64,
        fluence_cal_per_cm2: f64,
    ) -> Self {
        let area_m2 = std::f64::consts::PI * distance_m * distance_m;
        let population = (area_m2 * density.per_square_kilometer() / 1e6).floor();

        let fatalities = (population * 0.7 * (1.0 - (-overpressure_kpa / 50.0).exp())).floor();
        let injuries = (population * 0.6 * (1.0 - (-fluence_cal_per_cm2 / 15.0).exp())).floor();

        let percent = |count: f64| {
            if population > 0.0 {
                (count / population * 100.0).min(100.0)
            } else {
                0.0
            }
        };

        let population_count = population as u64;
        let fatalities_count = fatalities as u64;
        let injuries_count = injuries as u64;

        Self {
            population: population_count,
            fatalities: fatalities_count,
            injuries: injuries_count,
            affected: population_count.min(fatalities_count.saturating_add(injuries_count)),
            fatalities_percent: percent(fatalities),
            injuries_percent: percent(injuries),
        }
    }
}

/// Eight-point compass rose, clockwise from north
pub const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Nearest eight-point compass label for a direction in degrees
pub fn compass_label(direction_deg: f64) -> &'static str {
    let sector = (direction_deg.rem_euclid(360.0) / 45.0).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}

/// Geographic position formatted with hemisphere letters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude (degrees, north positive)
    pub latitude: f64,
    /// Longitude (degrees, east positive)
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blast_tiers() {
        assert_eq!(BlastSeverity::from_overpressure(9991.0), BlastSeverity::TotalDestruction);
        assert_eq!(BlastSeverity::from_overpressure(500.0), BlastSeverity::ReinforcedCollapse);
        assert_eq!(BlastSeverity::from_overpressure(35.0), BlastSeverity::Moderate);
        assert_eq!(BlastSeverity::from_overpressure(5.0), BlastSeverity::Minimal);
        assert!(BlastSeverity::Minor < BlastSeverity::TotalDestruction);
    }

    #[test]
    fn test_thermal_and_radiation_tiers() {
        assert_eq!(ThermalSeverity::from_fluence(38.99), ThermalSeverity::SecondDegree);
        assert_eq!(ThermalSeverity::from_fluence(0.0), ThermalSeverity::Sunburn);
        assert_eq!(RadiationSeverity::from_dose(6.5e-7), RadiationSeverity::Minimal);
        assert_eq!(RadiationSeverity::from_dose(7.0), RadiationSeverity::Lethal50);
        assert_eq!(
            RadiationSeverity::Lethal50.description(),
            "50% fatal within 30 days (LD50)"
        );
    }

    #[test]
    fn test_casualties_urban_reference() {
        let estimate =
            CasualtyEstimate::estimate(1000.0, PopulationDensity::Urban, 9991.219, 38.99296);
        assert_eq!(estimate.population, 31415);
        assert_eq!(estimate.fatalities, 21990);
        assert_eq!(estimate.injuries, 17448);
        assert_eq!(estimate.affected, 31415);
        assert!(estimate.fatalities_percent <= 100.0);
    }

    #[test]
    fn test_casualties_empty_disc() {
        let estimate = CasualtyEstimate::estimate(0.0, PopulationDensity::Dense, 1e4, 1e3);
        assert_eq!(estimate.population, 0);
        assert_eq!(estimate.affected, 0);
        assert_eq!(estimate.fatalities_percent, 0.0);
    }

    #[test]
    fn test_casualties_saturate_for_huge_population() {
        let estimate =
            CasualtyEstimate::estimate(1e10, PopulationDensity::Dense, 461948.92, 1.9e16);
        // F + I exceeds u64::MAX while N alone does not
        assert!(estimate.fatalities > u64::MAX / 2);
        assert!(estimate.injuries > u64::MAX / 2);
        assert_eq!(estimate.affected, estimate.population);
        assert!(estimate.fatalities <= estimate.population);
    }

    #[test]
    fn test_density_names() {
        assert_eq!(PopulationDensity::from_name("Rural").unwrap(), PopulationDensity::Rural);
        assert!(PopulationDensity::from_name("megacity").is_err());
    }

    #[test]
    fn test_compass_labels() {
        assert_eq!(compass_label(0.0), "N");
        assert_eq!(compass_label(90.0), "E");
        assert_eq!(compass_label(200.0), "S");
        assert_eq!(compass_label(337.5), "N");
        assert_eq!(compass_label(-45.0), "NW");
    }

    #[test]
    fn test_coordinate_format() {
        let tokyo = Coordinates {
            latitude: 35.6762,
            longitude: 139.6503,
        };
        assert_eq!(tokyo.to_string(), "35.6762°N, 139.6503°E");

        let lima = Coordinates {
            latitude: -12.0464,
            longitude: -77.0428,
        };
        assert_eq!(lima.to_string(), "12.0464°S, 77.0428°W");
    }
}
