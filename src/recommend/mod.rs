//! Drone usage recommendation.
//!
//! Maps the three predicted aerodynamic coefficients onto the UAV category
//! the propeller is best suited for.

mod classifier;
mod models;
mod routes;

pub use classifier::classify;
pub use models::{DroneCategory, DroneRecommendation};
pub use routes::router;
