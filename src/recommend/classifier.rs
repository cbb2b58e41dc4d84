//! Rule table for drone recommendations.
//!
//! Rules overlap in value space, so they are evaluated in order and the first
//! match wins. The last rule always matches.

use super::models::{DroneCategory, DroneRecommendation};

struct Rule {
    category: DroneCategory,
    rationale: &'static str,
    matches: fn(f64, f64, f64) -> bool,
}

static RULES: [Rule; 5] = [
    Rule {
        category: DroneCategory::Surveillance,
        rationale: "High efficiency and low power consumption make this propeller suitable for long-endurance surveillance missions.",
        matches: |_thrust, power, efficiency| efficiency >= 0.70 && power <= 0.05,
    },
    Rule {
        category: DroneCategory::Agriculture,
        rationale: "High thrust capability with stable efficiency, ideal for lifting spray payloads in agricultural applications.",
        matches: |thrust, power, efficiency| thrust >= 0.09 && efficiency >= 0.60 && power <= 0.06,
    },
    Rule {
        category: DroneCategory::Delivery,
        rationale: "Strong thrust output with higher power usage, suitable for payload transport and delivery drones.",
        matches: |thrust, power, _efficiency| thrust >= 0.09 && power > 0.06,
    },
    Rule {
        category: DroneCategory::Mapping,
        rationale: "Balanced thrust and efficiency enable stable hovering for aerial mapping and surveying.",
        matches: |_thrust, power, efficiency| efficiency >= 0.60 && power <= 0.06,
    },
    Rule {
        category: DroneCategory::RacingPerformance,
        rationale: "Performance-oriented characteristics prioritizing speed over endurance.",
        matches: |_, _, _| true,
    },
];

/// Classify a propeller by its predicted coefficients.
///
/// Inputs are not range-checked; negative or non-physical values are
/// classified like any other.
pub fn classify(thrust: f64, power: f64, efficiency: f64) -> DroneRecommendation {
    let rule = RULES
        .iter()
        .find(|rule| (rule.matches)(thrust, power, efficiency))
        .unwrap_or(&RULES[RULES.len() - 1]);

    DroneRecommendation {
        category: rule.category,
        title: rule.category.title(),
        rationale: rule.rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surveillance_wins_over_agriculture() {
        // Both rule 1 and rule 2 hold here; order decides.
        let rec = classify(0.10, 0.05, 0.70);
        assert_eq!(rec.category, DroneCategory::Surveillance);
        assert_eq!(rec.title, "Surveillance Drone");
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(classify(0.0, 0.05, 0.70).category, DroneCategory::Surveillance);
        assert_eq!(classify(0.09, 0.06, 0.60).category, DroneCategory::Agriculture);
        assert_eq!(classify(0.08, 0.06, 0.60).category, DroneCategory::Mapping);
    }

    #[test]
    fn test_delivery() {
        let rec = classify(0.12, 0.07, 0.50);
        assert_eq!(rec.category, DroneCategory::Delivery);
        assert!(rec.rationale.contains("payload transport"));
    }

    #[test]
    fn test_delivery_requires_power_strictly_above_limit() {
        // power == 0.06 is not "> 0.06", and efficiency is too low for the rest.
        assert_eq!(
            classify(0.12, 0.06, 0.50).category,
            DroneCategory::RacingPerformance
        );
    }

    #[test]
    fn test_fallback() {
        let rec = classify(0.01, 0.08, 0.10);
        assert_eq!(rec.category, DroneCategory::RacingPerformance);
        assert_eq!(
            rec.rationale,
            "Performance-oriented characteristics prioritizing speed over endurance."
        );
    }

    #[test]
    fn test_out_of_range_inputs_are_classified() {
        assert_eq!(classify(-1.0, -1.0, 5.0).category, DroneCategory::Surveillance);
        assert_eq!(
            classify(f64::NAN, f64::NAN, f64::NAN).category,
            DroneCategory::RacingPerformance
        );
    }

    #[test]
    fn test_every_input_yields_a_category() {
        let steps = [-0.1, 0.0, 0.05, 0.06, 0.09, 0.5, 0.6, 0.7, 1.0];
        for &t in &steps {
            for &p in &steps {
                for &e in &steps {
                    let rec = classify(t, p, e);
                    assert_eq!(rec.title, rec.category.title());
                    assert!(!rec.rationale.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(DroneCategory::RacingPerformance.to_string(), "Racing/Performance");
        assert_eq!(
            serde_json::to_value(DroneCategory::RacingPerformance).unwrap(),
            serde_json::json!("Racing/Performance")
        );
    }
}
