//! Validate, predict and classify.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::recommend;

use super::client::PredictionService;
use super::models::{MatchedPropeller, PredictionForm, PredictionOutcome, PredictionRequest};
use super::validator::{self, Validated};

/// Compute SHA256 hash of input string.
fn sha256_hex(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex::encode(digest))
}

/// Reject incomplete or invalid forms before anything is sent.
pub fn check(form: &PredictionForm) -> Result<Validated> {
    validator::validate(form)
        .map_err(|errors| AppError::Validation(errors.iter().map(ToString::to_string).collect()))
}

/// Ask the prediction service for coefficients and attach a recommendation.
pub async fn run(service: &dyn PredictionService, validated: Validated) -> Result<PredictionOutcome> {
    let Validated { input, warnings } = validated;

    let request_json = serde_json::to_string(&PredictionRequest::from(&input)).unwrap_or_default();
    let input_hash = sha256_hex(&request_json);

    let result = service.predict(&input).await?;

    let recommendation = recommend::classify(
        result.thrust_coefficient,
        result.power_coefficient,
        result.efficiency,
    );
    tracing::info!(
        category = %recommendation.category,
        thrust = result.thrust_coefficient,
        power = result.power_coefficient,
        efficiency = result.efficiency,
        "prediction classified"
    );

    let matched = result.matched_brand.map(|brand| MatchedPropeller {
        brand,
        diameter: result.matched_diameter,
        pitch: result.matched_pitch,
    });

    Ok(PredictionOutcome {
        input,
        thrust_coefficient: result.thrust_coefficient,
        power_coefficient: result.power_coefficient,
        efficiency: result.efficiency,
        matched,
        recommendation,
        input_hash,
        predicted_at: Utc::now(),
        warnings,
    })
}
