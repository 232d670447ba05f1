//! Error taxonomy for scenario validation and numeric guards
//!
//! Every formula in [`crate::physics`] assumes a validated domain. Inputs are
//! checked once (in [`crate::Scenario::validate`], [`crate::BurstGeometry::new`]
//! or the JSON boundary in [`crate::request`]) and any rejection is reported
//! through [`EffectsError`]. No NaN or infinity is allowed to reach a result.

use thiserror::Error;

/// Result alias used throughout the crate
pub type EffectsResult<T> = std::result::Result<T, EffectsError>;

/// Errors raised while validating scenarios or evaluating effects
#[derive(Debug, Error)]
pub enum EffectsError {
    /// A required field is missing, non-numeric, or outside its physical domain
    #[error("invalid scenario: {field} {reason}")]
    InvalidScenario {
        /// Name of the offending field as it appears in requests
        field: &'static str,
        /// Human-readable description of the violated constraint
        reason: String,
    },

    /// An intermediate quantity would divide by zero or lose all precision
    #[error("numeric degenerate: {quantity} {reason}")]
    NumericDegenerate {
        /// Quantity that degenerated (e.g. `slant_range`)
        quantity: &'static str,
        /// Human-readable description of the degeneracy
        reason: String,
    },

    /// The request body is not a JSON object at all
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}

impl EffectsError {
    /// Shorthand for [`EffectsError::InvalidScenario`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidScenario {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`EffectsError::NumericDegenerate`]
    pub fn degenerate(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::NumericDegenerate {
            quantity,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable tag used in client error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidScenario { .. } => "invalid_scenario",
            Self::NumericDegenerate { .. } => "numeric_degenerate",
            Self::MalformedRequest(_) => "malformed_request",
        }
    }
}

/// Reject non-finite or non-positive values
pub(crate) fn require_positive(field: &'static str, value: f64) -> EffectsResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EffectsError::invalid(
            field,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

/// Reject non-finite or negative values
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> EffectsResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EffectsError::invalid(
            field,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

/// Reject values outside the closed interval `[min, max]`
pub(crate) fn require_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> EffectsResult<f64> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(EffectsError::invalid(
            field,
            format!("must lie in [{min}, {max}], got {value}"),
        ))
    }
}

/// Reject non-finite values
pub(crate) fn require_finite(field: &'static str, value: f64) -> EffectsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EffectsError::invalid(
            field,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Reject a computed quantity that overflowed or underflowed to a non-finite value
pub(crate) fn require_finite_output(quantity: &'static str, value: f64) -> EffectsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EffectsError::degenerate(quantity, format!("evaluated to {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero_and_nan() {
        assert!(require_positive("yield", 0.0).is_err());
        assert!(require_positive("yield", -1.0).is_err());
        assert!(require_positive("yield", f64::NAN).is_err());
        assert_eq!(require_positive("yield", 20.0).ok(), Some(20.0));
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("distance", 0.0).ok(), Some(0.0));
        assert!(require_non_negative("distance", -0.5).is_err());
        assert!(require_non_negative("distance", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = require_in_range("atmosphere", 1.5, 0.0, 1.0).unwrap_err();
        assert_eq!(err.kind(), "invalid_scenario");
        assert!(err.to_string().contains("atmosphere"));
    }

    #[test]
    fn test_non_finite_output_is_degenerate() {
        let err = require_finite_output("thermal_fluence", f64::INFINITY).unwrap_err();
        assert_eq!(err.kind(), "numeric_degenerate");
        assert!(err.to_string().contains("thermal_fluence"));
        assert!(require_finite_output("prompt_dose", f64::NAN).is_err());
        assert_eq!(require_finite_output("prompt_dose", 0.0).ok(), Some(0.0));
    }
}
