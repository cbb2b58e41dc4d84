//! Prediction request flow.
//!
//! Validates the propeller parameters entered by the user, forwards them to
//! the coefficient prediction service and attaches a drone recommendation to
//! the predicted coefficients.

mod client;
mod flow;
mod models;
mod routes;
mod slot;
mod validator;

pub use client::{HttpPredictionService, PredictionService};
pub use flow::{check, run};
pub use models::{BladeCount, PredictionForm, PredictionInput, PredictionOutcome, PredictionResult};
pub use routes::router;
pub use slot::PredictionSlot;
pub use validator::Validated;
