//! Input Validator
//!
//! Turns a raw JSON mapping into a `FeatureVector`. Every field is checked
//! and all problems are returned together so a caller can report them in
//! one response.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{Feature, FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: Feature },

    #[error("{field} must be numeric")]
    NonNumericField { field: Feature },

    #[error("{field}: value {value} outside range [{min}, {max}]")]
    RangeViolation {
        field: Feature,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    pub fn field(&self) -> Feature {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::NonNumericField { field }
            | ValidationError::RangeViolation { field, .. } => *field,
        }
    }
}

/// Validate a raw request mapping. Keys other than the seven features are ignored.
pub fn validate(raw: &Map<String, Value>) -> Result<FeatureVector, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut values = [0.0f64; FEATURE_COUNT];

    for (slot, field) in values.iter_mut().zip(Feature::ALL) {
        match check_field(raw, field) {
            Ok(value) => *slot = value,
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(FeatureVector::from_ordered(values))
    } else {
        Err(errors)
    }
}

fn check_field(raw: &Map<String, Value>, field: Feature) -> Result<f64, ValidationError> {
    let value = match raw.get(field.key()) {
        None | Some(Value::Null) => return Err(ValidationError::MissingField { field }),
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => None,
    };

    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return Err(ValidationError::NonNumericField { field }),
    };

    let (min, max) = field.bounds();
    if value < min || value > max {
        return Err(ValidationError::RangeViolation { field, value, min, max });
    }

    Ok(value)
}
