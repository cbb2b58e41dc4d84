//! HTTP route handlers for the stateless prediction API.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::error::Result;
use crate::AppState;

use super::flow;
use super::models::{PredictionForm, PredictionOutcome};

/// Create the prediction router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(predict))
}

/// Validate the form, call the prediction service and classify the result.
async fn predict(
    State(state): State<AppState>,
    Json(form): Json<PredictionForm>,
) -> Result<Json<PredictionOutcome>> {
    let validated = flow::check(&form)?;
    let outcome = flow::run(state.predictor.as_ref(), validated).await?;
    Ok(Json(outcome))
}
