//! Data types for coefficient prediction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::recommend::DroneRecommendation;

/// Raw form entry; any field may be missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PredictionForm {
    pub blades: Option<i64>,
    /// Diameter in inches
    pub diameter: Option<f64>,
    /// Pitch in inches
    pub pitch: Option<f64>,
    pub advance_ratio: Option<f64>,
}

/// Supported blade counts. Two-blade propellers and 3/4-blade propellers
/// are served by different models on the prediction side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum BladeCount {
    Two,
    Three,
    Four,
}

impl BladeCount {
    pub fn get(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<i64> for BladeCount {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(other),
        }
    }
}

impl From<BladeCount> for u8 {
    fn from(count: BladeCount) -> u8 {
        count.get()
    }
}

/// Validated input, immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionInput {
    pub blades: BladeCount,
    pub diameter_inches: f64,
    pub pitch_inches: f64,
    pub advance_ratio: f64,
}

/// Body sent to the prediction service.
#[derive(Debug, Serialize)]
pub struct PredictionRequest {
    pub blades: u8,
    pub diameter: f64,
    pub pitch: f64,
    pub advance_ratio: f64,
}

impl From<&PredictionInput> for PredictionRequest {
    fn from(input: &PredictionInput) -> Self {
        Self {
            blades: input.blades.get(),
            diameter: input.diameter_inches,
            pitch: input.pitch_inches,
            advance_ratio: input.advance_ratio,
        }
    }
}

/// Coefficients returned by the prediction service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    pub thrust_coefficient: f64,
    pub power_coefficient: f64,
    pub efficiency: f64,
    /// Nearest catalogue propeller the service used for engineered features
    #[serde(default)]
    pub matched_brand: Option<String>,
    #[serde(default)]
    pub matched_diameter: Option<f64>,
    #[serde(default)]
    pub matched_pitch: Option<f64>,
}

/// Catalogue propeller closest to the requested geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPropeller {
    pub brand: String,
    pub diameter: Option<f64>,
    pub pitch: Option<f64>,
}

/// Rendered result of one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub input: PredictionInput,
    pub thrust_coefficient: f64,
    pub power_coefficient: f64,
    pub efficiency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchedPropeller>,
    pub recommendation: DroneRecommendation,
    /// SHA256 of the request body sent upstream
    pub input_hash: String,
    pub predicted_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
