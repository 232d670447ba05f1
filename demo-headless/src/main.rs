use blast_effects_core::physics::fallout::DISPLAY_THRESHOLD;
use blast_effects_core::{
    assess, assess_fallout, compass_label, handle, CasualtyEstimate, Coordinates, EffectsConfig,
    EffectsReport, Endpoint, FalloutField, FalloutGrid, GridQuality, Material, Phenomenon,
    PopulationDensity, Scenario,
};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Point-explosion effects demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "blast-effects-demo")]
#[command(about = "Blast, thermal, radiation and fallout effects of a point explosion", long_about = None)]
struct Args {
    /// Yield in kilotons TNT
    #[arg(short, long, default_value_t = 20.0)]
    yield_kt: f64,

    /// Ground distance from ground zero in meters
    #[arg(short, long, default_value_t = 1000.0)]
    distance: f64,

    /// Height of burst in meters
    #[arg(short = 'b', long, default_value_t = 0.0)]
    burst_height: f64,

    /// Treat as surface burst regardless of height (true/false)
    #[arg(long)]
    surface_burst: Option<bool>,

    /// Hours after the explosion for the residual dose rate
    #[arg(short, long, default_value_t = 1.0)]
    time: f64,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 5.0)]
    wind_speed: f64,

    /// Wind direction in degrees
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f64,

    /// Burst latitude in degrees
    #[arg(long, default_value_t = 0.0)]
    latitude: f64,

    /// Burst longitude in degrees
    #[arg(long, default_value_t = 0.0)]
    longitude: f64,

    /// Atmospheric transmissivity (0-1)
    #[arg(short, long, default_value_t = 0.7)]
    atmosphere: f64,

    /// Fission fraction of yield (0-1)
    #[arg(long, default_value_t = 0.5)]
    fission_fraction: f64,

    /// Rainout enhancement factor (1-3)
    #[arg(long, default_value_t = 1.0)]
    rainout: f64,

    /// Ignition target material (wood, fabric, other)
    #[arg(short, long, default_value = "wood")]
    material: String,

    /// Population density class (rural, suburban, urban, dense)
    #[arg(short, long, default_value = "urban")]
    population: String,

    /// Fallout grid quality preset (low, medium, high, ultra)
    #[arg(short, long, default_value = "medium")]
    quality: String,

    /// Fallout samples per side (overrides --quality)
    #[arg(short, long)]
    resolution: Option<usize>,

    /// Fallout grid half-width in meters
    #[arg(long, default_value_t = 20_000.0)]
    radius: f64,

    /// Also compute the fallout field
    #[arg(short, long)]
    fallout: bool,

    /// Print the JSON response bodies instead of the report
    #[arg(short, long)]
    json: bool,
}

impl Args {
    fn scenario(&self) -> Scenario {
        let scenario = Scenario::new(self.yield_kt, self.distance)
            .with_burst_height(self.burst_height)
            .with_time_after_explosion(self.time)
            .with_wind(self.wind_speed, self.wind_direction)
            .with_location(self.latitude, self.longitude);
        match self.surface_burst {
            Some(surface) => scenario.with_surface_burst(surface),
            None => scenario,
        }
    }

    fn config(&self) -> Result<EffectsConfig, String> {
        let grid = match self.resolution {
            Some(resolution) => FalloutGrid::new(resolution, self.radius),
            None => {
                let quality = GridQuality::from_name(&self.quality)
                    .ok_or_else(|| format!("unknown quality preset '{}'", self.quality))?;
                FalloutGrid::from_quality(quality, self.radius)
            }
        };

        Ok(EffectsConfig {
            transmissivity: self.atmosphere,
            fission_fraction: self.fission_fraction,
            rainout_factor: self.rainout,
            material: Material::from_name(&self.material),
            fallout_grid: grid,
        })
    }

    /// Request bodies in the shape the JSON boundary accepts
    fn blast_body(&self) -> serde_json::Value {
        serde_json::json!({
            "yield": self.yield_kt,
            "distance": self.distance,
            "burst_height": self.burst_height,
            "time_after_explosion": self.time,
            "wind_speed": self.wind_speed,
            "atmosphere": self.atmosphere,
            "fission_fraction": self.fission_fraction,
            "rainout_factor": self.rainout,
            "material": self.material,
        })
    }

    fn fallout_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "yield": self.yield_kt,
            "burst_height": self.burst_height,
            "latitude": self.latitude,
            "longitude": self.longitude,
            "wind_speed": self.wind_speed,
            "wind_direction": self.wind_direction,
            "quality": self.quality,
            "radius": self.radius,
        });
        if let Some(resolution) = self.resolution {
            body["resolution"] = resolution.into();
        }
        body
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = if args.json {
        run_json(&args)
    } else {
        run_report(&args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_json(args: &Args) -> Result<(), String> {
    let mut requests = vec![(Endpoint::CalculateBlast, args.blast_body())];
    if args.fallout {
        requests.push((Endpoint::CalculateFallout, args.fallout_body()));
    }

    let mut failed = false;
    for (endpoint, body) in requests {
        let response = handle(endpoint, &body.to_string());
        info!(endpoint = endpoint.path(), status = response.status, "request handled");
        println!("{}", response.body);
        failed |= !response.is_success();
    }

    if failed {
        Err("request rejected".to_string())
    } else {
        Ok(())
    }
}

fn run_report(args: &Args) -> Result<(), String> {
    let scenario = args.scenario();
    let config = args.config()?;
    let density = PopulationDensity::from_name(&args.population).map_err(|e| e.to_string())?;
    info!(
        yield_kt = scenario.yield_kt,
        distance_m = scenario.distance_m,
        fallout = args.fallout,
        "evaluating scenario"
    );

    let report = assess(&scenario, &config).map_err(|e| e.to_string())?;
    let field = if args.fallout {
        Some(assess_fallout(&scenario, &config).map_err(|e| e.to_string())?)
    } else {
        None
    };

    println!("=== Point Explosion Effects ===\n");
    println!(
        "Yield: {:.1} kt, Distance: {:.0} m, Burst height: {:.0} m ({:?})",
        scenario.yield_kt,
        scenario.distance_m,
        scenario.burst_height_m,
        scenario.burst_kind()
    );
    println!(
        "Location: {}",
        Coordinates {
            latitude: scenario.latitude,
            longitude: scenario.longitude,
        }
    );
    println!(
        "Wind: {:.1} m/s from {:.0}° ({})",
        scenario.wind_speed_ms,
        scenario.wind_direction_normalized(),
        compass_label(scenario.wind_direction_deg)
    );
    println!("Scaled distance Z: {:.3} m/kg^(1/3)\n", report.scaled_distance);

    for phenomenon in Phenomenon::ALL {
        println!("--- {} ---", phenomenon.name());
        match phenomenon {
            Phenomenon::Blast => print_blast(&report),
            Phenomenon::Thermal => print_thermal(&report, config.material),
            Phenomenon::Radiation => print_radiation(&report),
            Phenomenon::Fallout => match &field {
                Some(field) => print_fallout(field),
                None => println!("  (skipped, pass --fallout)"),
            },
        }
        println!();
    }

    let casualties = CasualtyEstimate::estimate(
        scenario.distance_m,
        density,
        report.blast.overpressure_kpa,
        report.thermal.fluence_cal_per_cm2,
    );
    println!("--- casualties ({:?}) ---", density);
    println!("  Population in radius: {}", casualties.population);
    println!(
        "  Fatalities: {} ({:.1}%)",
        casualties.fatalities, casualties.fatalities_percent
    );
    println!(
        "  Injuries: {} ({:.1}%)",
        casualties.injuries, casualties.injuries_percent
    );
    println!("  Total affected: {}", casualties.affected);

    Ok(())
}

fn print_blast(report: &EffectsReport) {
    let blast = &report.blast;
    println!("  Peak overpressure: {:.1} kPa", blast.overpressure_kpa);
    println!("  Dynamic pressure: {:.1} kPa", blast.dynamic_pressure_kpa);
    println!("  Arrival time: {:.3} s", blast.arrival_time_s);
    println!("  Positive phase: {:.3} s", blast.positive_phase_duration_s);
    println!("  Severity: {}", report.blast_severity().description());
}

fn print_thermal(report: &EffectsReport, material: Material) {
    let thermal = &report.thermal;
    println!("  Fluence: {:.2} cal/cm²", thermal.fluence_cal_per_cm2);
    println!(
        "  Ignition probability ({}): {:.1}%",
        material.name(),
        thermal.ignition_probability * 100.0
    );
    println!("  Severity: {}", report.thermal_severity().description());
}

fn print_radiation(report: &EffectsReport) {
    let radiation = &report.radiation;
    println!("  Prompt dose: {:.3e} Sv", radiation.prompt_dose_sv);
    println!(
        "  Residual dose rate: {:.3e} Sv/h",
        radiation.residual_dose_rate_sv_per_h
    );
    println!("  Severity: {}", report.radiation_severity().description());
}

fn print_fallout(field: &FalloutField) {
    let spread = field.spread();
    println!(
        "  Grid: {0}x{0}, plume sigma {1:.0} m x {2:.0} m",
        field.resolution(),
        spread.sigma_east_m,
        spread.sigma_north_m
    );
    println!(
        "  Total deposited: {:.3e} kBq/m² summed over cells",
        field.total_contamination()
    );
    if let Some(peak) = field.peak() {
        println!(
            "  Peak: {:.3e} kBq/m² at {}",
            peak.contamination,
            Coordinates {
                latitude: peak.latitude,
                longitude: peak.longitude,
            }
        );
    }
    let samples = field.significant_samples(DISPLAY_THRESHOLD, field.display_stride());
    println!(
        "  Display samples above {} kBq/m²: {}",
        DISPLAY_THRESHOLD,
        samples.len()
    );
}
