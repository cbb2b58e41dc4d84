//! Validation of user-entered prediction parameters.

use super::models::{BladeCount, PredictionForm, PredictionInput};

/// Advance ratios the models were trained on; values outside are allowed.
pub const RECOMMENDED_ADVANCE_RATIO: std::ops::RangeInclusive<f64> = 0.2..=0.7;

/// Validation error types.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    UnsupportedBladeCount(i64),
    NotPositive(&'static str),
    NotFinite(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::UnsupportedBladeCount(n) => write!(f, "blade count must be 2, 3 or 4 (got {n})"),
            Self::NotPositive(field) => write!(f, "{field} must be greater than zero"),
            Self::NotFinite(field) => write!(f, "{field} must be a finite number"),
        }
    }
}

/// Input that passed validation, plus advisory warnings.
#[derive(Debug)]
pub struct Validated {
    pub input: PredictionInput,
    pub warnings: Vec<String>,
}

/// Check every field, reporting all problems at once.
pub fn validate(form: &PredictionForm) -> Result<Validated, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let blades = match form.blades {
        None => {
            errors.push(ValidationError::MissingField("blades"));
            None
        }
        Some(n) => match BladeCount::try_from(n) {
            Ok(count) => Some(count),
            Err(n) => {
                errors.push(ValidationError::UnsupportedBladeCount(n));
                None
            }
        },
    };

    let diameter = positive(form.diameter, "diameter", &mut errors);
    let pitch = positive(form.pitch, "pitch", &mut errors);

    let advance_ratio = match form.advance_ratio {
        None => {
            errors.push(ValidationError::MissingField("advance_ratio"));
            None
        }
        Some(j) if !j.is_finite() => {
            errors.push(ValidationError::NotFinite("advance_ratio"));
            None
        }
        Some(j) => Some(j),
    };

    match (blades, diameter, pitch, advance_ratio) {
        (Some(blades), Some(diameter), Some(pitch), Some(advance_ratio)) if errors.is_empty() => {
            let mut warnings = Vec::new();
            if !RECOMMENDED_ADVANCE_RATIO.contains(&advance_ratio) {
                warnings.push(format!(
                    "advance ratio {advance_ratio} is outside the recommended range {}-{}",
                    RECOMMENDED_ADVANCE_RATIO.start(),
                    RECOMMENDED_ADVANCE_RATIO.end()
                ));
            }
            Ok(Validated {
                input: PredictionInput {
                    blades,
                    diameter_inches: diameter,
                    pitch_inches: pitch,
                    advance_ratio,
                },
                warnings,
            })
        }
        _ => Err(errors),
    }
}

fn positive(
    value: Option<f64>,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<f64> {
    match value {
        None => {
            errors.push(ValidationError::MissingField(field));
            None
        }
        Some(v) if !v.is_finite() => {
            errors.push(ValidationError::NotFinite(field));
            None
        }
        Some(v) if v <= 0.0 => {
            errors.push(ValidationError::NotPositive(field));
            None
        }
        Some(v) => Some(v),
    }
}
