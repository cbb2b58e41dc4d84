//! HTTP route handlers for the recommendation API.

use axum::{response::Json, routing::post, Router};

use crate::AppState;

use super::classifier;
use super::models::{DroneRecommendation, RecommendRequest};

/// Create the recommendation router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(recommend))
}

/// Classify already-known coefficients without calling the prediction service.
async fn recommend(Json(request): Json<RecommendRequest>) -> Json<DroneRecommendation> {
    Json(classifier::classify(
        request.thrust_coefficient,
        request.power_coefficient,
        request.efficiency,
    ))
}
