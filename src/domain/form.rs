// Workout form input and validation
use super::workout::WorkoutKind;
use serde::{Deserialize, Serialize};

/// Alert shown for any rejected submission
pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";

/// Raw form values as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

/// Form values after coercion, all finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedForm {
    pub kind: WorkoutKind,
    pub distance_km: f64,
    pub duration_min: f64,
    /// cadence for running, elevation gain for cycling
    pub metric: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },
}

impl FormInput {
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let (metric_field, metric_raw) = match self.kind {
            WorkoutKind::Running => ("cadence", &self.cadence),
            WorkoutKind::Cycling => ("elevation", &self.elevation),
        };

        let fields = [
            ("distance", coerce_number(&self.distance)),
            ("duration", coerce_number(&self.duration)),
            (metric_field, coerce_number(metric_raw)),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field });
            }
        }
        for (field, value) in fields {
            if value <= 0.0 {
                return Err(ValidationError::NotPositive { field });
            }
        }

        Ok(ValidatedForm {
            kind: self.kind,
            distance_km: fields[0].1,
            duration_min: fields[1].1,
            metric: fields[2].1,
        })
    }
}

/// Browser-style numeric coercion: blank is zero, garbage is NaN.
///
/// Accepts decimal and exponent forms, `Infinity`, and unsigned `0x`/`0o`/`0b`
/// literals. Spellings only Rust understands (`inf`, `nan`) are NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_prefixed(trimmed) {
        return value;
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let decimal = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if decimal || unsigned == "Infinity" {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_prefixed(literal: &str) -> Option<f64> {
    let radix = match literal.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &literal[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.unwrap_or(f64::NAN))
}
