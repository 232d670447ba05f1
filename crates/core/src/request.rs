//! JSON request/response boundary
//!
//! Parses loosely typed request bodies into a validated [`Scenario`] and
//! [`EffectsConfig`], dispatches to [`crate::assessment`], and renders the
//! flat response mappings. Numeric fields accept JSON numbers or numeric
//! strings (form inputs submit strings); anything else is rejected with a
//! client error body, never coerced to a default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::assessment::{assess, assess_fallout, EffectsReport};
use crate::core_types::config::{EffectsConfig, FalloutGrid, GridQuality};
use crate::core_types::scenario::Scenario;
use crate::error::{EffectsError, EffectsResult};
use crate::physics::fallout::FalloutField;
use crate::physics::thermal::Material;

/// HTTP status for successful evaluations
pub const STATUS_OK: u16 = 200;

/// HTTP status for rejected requests
pub const STATUS_CLIENT_ERROR: u16 = 400;

/// Request endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Blast, thermal and radiation scalars
    CalculateBlast,
    /// Fallout contamination grid
    CalculateFallout,
}

impl Endpoint {
    /// Route a request path
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "/calculate-blast" => Some(Self::CalculateBlast),
            "/calculate-fallout" => Some(Self::CalculateFallout),
            _ => None,
        }
    }

    /// Canonical request path
    pub const fn path(self) -> &'static str {
        match self {
            Self::CalculateBlast => "/calculate-blast",
            Self::CalculateFallout => "/calculate-fallout",
        }
    }
}

/// Flat scalar response of the blast endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastResponse {
    pub overpressure_kpa: f64,
    pub dynamic_pressure_kpa: f64,
    pub arrival_time_sec: f64,
    pub positive_phase_duration_sec: f64,
    pub thermal_cal_per_cm2: f64,
    pub ignition_probability: f64,
    pub prompt_radiation_sv: f64,
    pub residual_radiation_sv_per_h: f64,
}

impl From<&EffectsReport> for BlastResponse {
    fn from(report: &EffectsReport) -> Self {
        Self {
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

/// Fallout response: three row-major `resolution × resolution` arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloutResponse {
    pub longitude: Vec<Vec<f64>>,
    pub latitude: Vec<Vec<f64>>,
    pub contamination: Vec<Vec<f64>>,
}

impl From<&FalloutField> for FalloutResponse {
    fn from(field: &FalloutField) -> Self {
        Self {
            longitude: field.to_nested(field.longitude()),
            latitude: field.to_nested(field.latitude()),
            contamination: field.to_nested(field.contamination()),
        }
    }
}

/// Client error body `{"error": kind, "message": text}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    /// Render as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.error, "message": self.message }).to_string()
    }
}

impl From<&EffectsError> for ErrorBody {
    fn from(err: &EffectsError) -> Self {
        Self {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Rendered response: status code and JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    /// `true` for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Evaluate one request body and render the success body
///
/// # Errors
/// Any parse, validation or evaluation error; the caller renders it with
/// [`ErrorBody`].
pub fn respond(endpoint: Endpoint, body: &str) -> EffectsResult<String> {
    let rendered = match endpoint {
        Endpoint::CalculateBlast => serde_json::to_string(&calculate_blast(body)?)?,
        Endpoint::CalculateFallout => serde_json::to_string(&calculate_fallout(body)?)?,
    };
    Ok(rendered)
}

/// Handle one request body for an endpoint
pub fn handle(endpoint: Endpoint, body: &str) -> Response {
    match respond(endpoint, body) {
        Ok(body) => Response {
            status: STATUS_OK,
            body,
        },
        Err(err) => {
            warn!(endpoint = endpoint.path(), error = %err, "request rejected");
            Response {
                status: STATUS_CLIENT_ERROR,
                body: ErrorBody::from(&err).to_json(),
            }
        }
    }
}

/// Parse and evaluate a blast request body
///
/// Fields: `yield` and `distance` (required); `burst_height` (0),
/// `time_after_explosion` (1 h), `wind_speed` (5), `atmosphere` (0.7),
/// `fission_fraction` (0.5), `rainout_factor` (1), `material` ("wood").
///
/// # Errors
/// [`EffectsError::MalformedRequest`] for unparseable JSON, otherwise any
/// validation or evaluation error.
pub fn calculate_blast(body: &str) -> EffectsResult<BlastResponse> {
    let (scenario, config) = parse_blast_request(body)?;
    let report = assess(&scenario, &config)?;
    Ok(BlastResponse::from(&report))
}

/// Parse and evaluate a fallout request body
///
/// Fields: `yield`, `burst_height`, `latitude`, `longitude` (required);
/// `wind_speed` (5), `wind_direction` (90), `resolution` or `quality`
/// (100), `radius` (20 000 m).
///
/// # Errors
/// [`EffectsError::MalformedRequest`] for unparseable JSON, otherwise any
/// validation or evaluation error.
pub fn calculate_fallout(body: &str) -> EffectsResult<FalloutResponse> {
    let (scenario, config) = parse_fallout_request(body)?;
    let field = assess_fallout(&scenario, &config)?;
    Ok(FalloutResponse::from(&field))
}

/// Parse a blast request into scenario and configuration
///
/// # Errors
/// See [`calculate_blast`].
pub fn parse_blast_request(body: &str) -> EffectsResult<(Scenario, EffectsConfig)> {
    let fields = parse_object(body)?;
    let defaults = EffectsConfig::default();
    let base = Scenario::default();

    let scenario = Scenario::new(
        required(&fields, "yield")?,
        required(&fields, "distance")?,
    )
    .with_burst_height(optional(&fields, "burst_height", 0.0)?)
    .with_time_after_explosion(optional(
        &fields,
        "time_after_explosion",
        base.time_after_explosion_h,
    )?)
    .with_wind(
        optional(&fields, "wind_speed", base.wind_speed_ms)?,
        optional(&fields, "wind_direction", base.wind_direction_deg)?,
    );

    let config = EffectsConfig {
        transmissivity: optional(&fields, "atmosphere", defaults.transmissivity)?,
        fission_fraction: optional(&fields, "fission_fraction", defaults.fission_fraction)?,
        rainout_factor: optional(&fields, "rainout_factor", defaults.rainout_factor)?,
        material: text(&fields, "material")?.map_or(defaults.material, Material::from_name),
        ..defaults
    };

    Ok((scenario, config))
}

/// Parse a fallout request into scenario and configuration
///
/// # Errors
/// See [`calculate_fallout`].
pub fn parse_fallout_request(body: &str) -> EffectsResult<(Scenario, EffectsConfig)> {
    let fields = parse_object(body)?;
    let base = Scenario::default();

    let scenario = Scenario {
        yield_kt: required(&fields, "yield")?,
        burst_height_m: required(&fields, "burst_height")?,
        latitude: required(&fields, "latitude")?,
        longitude: required(&fields, "longitude")?,
        wind_speed_ms: optional(&fields, "wind_speed", base.wind_speed_ms)?,
        wind_direction_deg: optional(&fields, "wind_direction", base.wind_direction_deg)?,
        ..base
    };

    let quality = text(&fields, "quality")?
        .map(|name| {
            GridQuality::from_name(name).ok_or_else(|| {
                EffectsError::invalid("quality", format!("unknown grid quality '{name}'"))
            })
        })
        .transpose()?
        .unwrap_or_default();
    let resolution = count(&fields, "resolution")?.unwrap_or_else(|| quality.resolution());
    let default_grid = FalloutGrid::default();

    let config = EffectsConfig {
        fallout_grid: FalloutGrid::new(
            resolution,
            optional(&fields, "radius", default_grid.radius_m)?,
        ),
        ..EffectsConfig::default()
    };

    Ok((scenario, config))
}

fn parse_object(body: &str) -> EffectsResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(EffectsError::invalid(
            "body",
            format!("must be a JSON object, got {}", json_type(&other)),
        )),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Numeric field: absent or null is `None`, numbers and numeric strings parse
fn number(fields: &Map<String, Value>, field: &'static str) -> EffectsResult<Option<f64>> {
    let value = match fields.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(EffectsError::invalid(
            field,
            format!("is not numeric: {value}"),
        )),
    }
}

fn required(fields: &Map<String, Value>, field: &'static str) -> EffectsResult<f64> {
    number(fields, field)?.ok_or_else(|| EffectsError::invalid(field, "is required"))
}

fn optional(fields: &Map<String, Value>, field: &'static str, default: f64) -> EffectsResult<f64> {
    Ok(number(fields, field)?.unwrap_or(default))
}

/// Non-negative whole-number field
fn count(fields: &Map<String, Value>, field: &'static str) -> EffectsResult<Option<usize>> {
    match number(fields, field)? {
        None => Ok(None),
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 => Ok(Some(v as usize)),
        Some(v) => Err(EffectsError::invalid(
            field,
            format!("must be a non-negative whole number, got {v}"),
        )),
    }
}

fn text<'a>(fields: &'a Map<String, Value>, field: &'static str) -> EffectsResult<Option<&'a str>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(EffectsError::invalid(
            field,
            format!("must be a string, got {}", json_type(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_routes() {
        assert_eq!(
            Endpoint::from_path("/calculate-blast"),
            Some(Endpoint::CalculateBlast)
        );
        assert_eq!(
            Endpoint::from_path("/calculate-fallout/"),
            Some(Endpoint::CalculateFallout)
        );
        assert_eq!(Endpoint::from_path("/"), None);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let (scenario, config) =
            parse_blast_request(r#"{"yield": "20", "distance": " 1000 ", "atmosphere": "0.5"}"#)
                .unwrap();
        assert_eq!(scenario.yield_kt, 20.0);
        assert_eq!(scenario.distance_m, 1000.0);
        assert_eq!(scenario.burst_height_m, 0.0);
        assert_eq!(config.transmissivity, 0.5);
        assert_eq!(config.material, Material::Wood);
    }

    #[test]
    fn test_missing_and_non_numeric_fields() {
        let missing = parse_blast_request(r#"{"distance": 1000}"#).unwrap_err();
        assert!(matches!(
            missing,
            EffectsError::InvalidScenario { field: "yield", .. }
        ));

        let null = parse_blast_request(r#"{"yield": null, "distance": 1000}"#).unwrap_err();
        assert!(null.to_string().contains("required"));

        let junk = parse_blast_request(r#"{"yield": "lots", "distance": 1000}"#).unwrap_err();
        assert!(junk.to_string().contains("not numeric"));

        let array = parse_blast_request(r#"{"yield": [1], "distance": 1000}"#).unwrap_err();
        assert_eq!(array.kind(), "invalid_scenario");
    }

    #[test]
    fn test_malformed_json() {
        let err = calculate_blast("{yield: 20").unwrap_err();
        assert_eq!(err.kind(), "malformed_request");

        let err = calculate_blast("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, EffectsError::InvalidScenario { field: "body", .. }));
    }

    #[test]
    fn test_blast_response_keys() {
        let response = handle(Endpoint::CalculateBlast, r#"{"yield": 20, "distance": 1000}"#);
        assert_eq!(response.status, STATUS_OK);

        let body: Value = serde_json::from_str(&response.body).unwrap();
        let keys = [
            "overpressure_kpa",
            "dynamic_pressure_kpa",
            "arrival_time_sec",
            "positive_phase_duration_sec",
            "thermal_cal_per_cm2",
            "ignition_probability",
            "prompt_radiation_sv",
            "residual_radiation_sv_per_h",
        ];
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), keys.len());
        for key in keys {
            assert!(object[key].is_f64(), "{key} missing or not a float");
        }
        assert_relative_eq!(
            object["overpressure_kpa"].as_f64().unwrap(),
            9991.219049921907,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_rejection_body() {
        let response = handle(Endpoint::CalculateBlast, r#"{"yield": -1, "distance": 10}"#);
        assert_eq!(response.status, STATUS_CLIENT_ERROR);
        assert!(!response.is_success());

        let body: ErrorBody = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body.error, "invalid_scenario");
        assert!(body.message.contains("yield"));
    }

    #[test]
    fn test_fallout_request() {
        let body = r#"{"yield": 20, "burst_height": 500, "latitude": 35.0,
                       "longitude": 139.0, "resolution": 20, "radius": 5000}"#;
        let response = calculate_fallout(body).unwrap();
        assert_eq!(response.contamination.len(), 20);
        assert!(response.longitude.iter().all(|row| row.len() == 20));
    }

    #[test]
    fn test_fallout_quality_and_resolution() {
        let base = r#""yield": 1, "burst_height": 100, "latitude": 0, "longitude": 0"#;

        let (_, config) = parse_fallout_request(&format!(r#"{{{base}, "quality": "low"}}"#)).unwrap();
        assert_eq!(config.fallout_grid.resolution, 50);

        let err = parse_fallout_request(&format!(r#"{{{base}, "resolution": 12.5}}"#)).unwrap_err();
        assert!(matches!(err, EffectsError::InvalidScenario { field: "resolution", .. }));

        let missing = parse_fallout_request(r#"{"yield": 1, "latitude": 0, "longitude": 0}"#);
        assert!(matches!(
            missing,
            Err(EffectsError::InvalidScenario { field: "burst_height", .. })
        ));
    }
}
