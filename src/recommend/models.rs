//! Data types for drone recommendations.

use serde::{Deserialize, Serialize};

/// UAV usage category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DroneCategory {
    Surveillance,
    Agriculture,
    Delivery,
    Mapping,
    #[serde(rename = "Racing/Performance")]
    RacingPerformance,
}

impl DroneCategory {
    /// Heading shown on the result card.
    pub fn title(self) -> &'static str {
        match self {
            Self::Surveillance => "Surveillance Drone",
            Self::Agriculture => "Agriculture Drone",
            Self::Delivery => "Delivery Drone",
            Self::Mapping => "Mapping Drone",
            Self::RacingPerformance => "Racing / Performance Drone",
        }
    }
}

impl std::fmt::Display for DroneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Surveillance => "Surveillance",
            Self::Agriculture => "Agriculture",
            Self::Delivery => "Delivery",
            Self::Mapping => "Mapping",
            Self::RacingPerformance => "Racing/Performance",
        };
        f.write_str(label)
    }
}

/// Recommended category together with the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroneRecommendation {
    pub category: DroneCategory,
    /// Result card heading
    pub title: &'static str,
    pub rationale: &'static str,
}

/// Request payload for a classifier-only lookup.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub thrust_coefficient: f64,
    pub power_coefficient: f64,
    pub efficiency: f64,
}
