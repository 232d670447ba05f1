//! JSON Boundary Tests
//!
//! Exercises both endpoints with the payload shape a form front end submits
//! (numeric strings, extra fields) and with malformed bodies, checking that
//! every failure becomes a client error body rather than a panic.
//!
//! Run tests with: `cargo test --test request_boundary`

use approx::assert_relative_eq;
use blast_effects_core::{
    handle,
    request::{BlastResponse, ErrorBody, FalloutResponse, STATUS_CLIENT_ERROR, STATUS_OK},
    Endpoint,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Front-end payload: every field as a string, plus location and wind
const FORM_PAYLOAD: &str = r#"{
    "yield": "20",
    "distance": "1000",
    "burst_height": "0",
    "wind_speed": "5",
    "wind_direction": "90",
    "atmosphere": "0.7",
    "latitude": 35.6762,
    "longitude": 139.6503
}"#;

fn rejected(endpoint: Endpoint, body: &str) -> ErrorBody {
    let response = handle(endpoint, body);
    assert_eq!(response.status, STATUS_CLIENT_ERROR, "body: {}", response.body);
    serde_json::from_str(&response.body).unwrap()
}

#[test]
fn test_form_payload_blast() {
    let response = handle(Endpoint::CalculateBlast, FORM_PAYLOAD);
    assert_eq!(response.status, STATUS_OK);

    let blast: BlastResponse = serde_json::from_str(&response.body).unwrap();
    assert_relative_eq!(blast.overpressure_kpa, 9991.219049921907, max_relative = 1e-9);
    assert_relative_eq!(blast.thermal_cal_per_cm2, 38.99296105751435, max_relative = 1e-9);
    assert_relative_eq!(blast.prompt_radiation_sv, 6.52014e-07, max_relative = 1e-9);
    assert_relative_eq!(
        blast.residual_radiation_sv_per_h,
        0.06666666666666667,
        max_relative = 1e-9
    );
}

#[test]
fn test_form_payload_fallout() {
    let response = handle(Endpoint::CalculateFallout, FORM_PAYLOAD);
    assert_eq!(response.status, STATUS_OK);

    let fallout: FalloutResponse = serde_json::from_str(&response.body).unwrap();
    assert_eq!(fallout.contamination.len(), 100);
    assert_eq!(fallout.latitude.len(), 100);
    assert!(fallout.longitude.iter().all(|row| row.len() == 100));

    // Row-major with longitude varying along each row
    assert!(fallout.longitude[0][1] > fallout.longitude[0][0]);
    assert_eq!(fallout.latitude[0][0], fallout.latitude[0][99]);
    assert!(fallout.latitude[1][0] > fallout.latitude[0][0]);
}

#[test]
fn test_missing_required_field() {
    let body = rejected(Endpoint::CalculateBlast, r#"{"yield": 20}"#);
    assert_eq!(body.error, "invalid_scenario");
    assert!(body.message.contains("distance"));
}

#[test]
fn test_out_of_domain_values() {
    for payload in [
        r#"{"yield": 0, "distance": 100}"#,
        r#"{"yield": 10, "distance": -5}"#,
        r#"{"yield": 10, "distance": 100, "time_after_explosion": 0}"#,
        r#"{"yield": 10, "distance": 100, "atmosphere": 2}"#,
    ] {
        let body = rejected(Endpoint::CalculateBlast, payload);
        assert_eq!(body.error, "invalid_scenario", "payload: {payload}");
    }
}

#[test]
fn test_ground_zero_is_degenerate() {
    let body = rejected(Endpoint::CalculateBlast, r#"{"yield": 10, "distance": 0}"#);
    assert_eq!(body.error, "numeric_degenerate");
}

/// Finite inputs whose results overflow or underflow never produce a 200 with nulls
#[test]
fn test_extreme_magnitudes_are_degenerate() {
    let cases = [
        (Endpoint::CalculateBlast, r#"{"yield": 1e300, "distance": 1000}"#),
        (Endpoint::CalculateBlast, r#"{"yield": 20, "distance": 1e-170}"#),
        (
            Endpoint::CalculateFallout,
            r#"{"yield": 1e300, "burst_height": 500, "latitude": 35, "longitude": 139,
                "resolution": 3}"#,
        ),
    ];

    for (endpoint, payload) in cases {
        let body = rejected(endpoint, payload);
        assert_eq!(body.error, "numeric_degenerate", "payload {payload}");
        assert!(!body.message.is_empty());
    }
}

#[test]
fn test_malformed_bodies() {
    for payload in ["", "not json", "{\"yield\": 1,", "null", "42"] {
        let body = rejected(Endpoint::CalculateBlast, payload);
        assert!(
            body.error == "malformed_request" || body.error == "invalid_scenario",
            "payload {payload:?} gave {}",
            body.error
        );
    }
}

#[test]
fn test_fallout_rejections() {
    let polar = rejected(
        Endpoint::CalculateFallout,
        r#"{"yield": 1, "burst_height": 100, "latitude": 90, "longitude": 0}"#,
    );
    assert!(polar.message.contains("latitude"));

    let oversized = rejected(
        Endpoint::CalculateFallout,
        r#"{"yield": 1, "burst_height": 100, "latitude": 0, "longitude": 0, "resolution": 501}"#,
    );
    assert!(oversized.message.contains("resolution"));

    let bad_quality = rejected(
        Endpoint::CalculateFallout,
        r#"{"yield": 1, "burst_height": 100, "latitude": 0, "longitude": 0, "quality": "max"}"#,
    );
    assert!(bad_quality.message.contains("quality"));
}

#[test]
fn test_unknown_material_falls_back() {
    let response = handle(
        Endpoint::CalculateBlast,
        r#"{"yield": 20, "distance": 1000, "material": "granite"}"#,
    );
    assert_eq!(response.status, STATUS_OK);
    let blast: BlastResponse = serde_json::from_str(&response.body).unwrap();

    // Other: k = 0.12, θ = 10
    let expected = 1.0 / (1.0 + (-0.12 * (blast.thermal_cal_per_cm2 - 10.0)).exp());
    assert_relative_eq!(blast.ignition_probability, expected, max_relative = 1e-12);
}
