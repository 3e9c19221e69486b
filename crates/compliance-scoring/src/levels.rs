//! Classification scales
//!
//! Two distinct scales are used and must not be merged:
//! - [`RiskLevel`]: two thresholds over weighted 0-10 scores (categories, overall)
//! - [`TrafficLight`]: three integer bands over raw answer values and their
//!   unweighted averages (questions, subcategories)

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn color(self) -> RiskColor {
        match self {
            RiskLevel::Low => RiskColor::Green,
            RiskLevel::Medium => RiskColor::Yellow,
            RiskLevel::High => RiskColor::Red,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard color attached to a risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Red,
    Orange,
    Green,
}

impl TrafficLight {
    /// Hex color used by the PDF renderers
    pub fn hex(self) -> &'static str {
        match self {
            TrafficLight::Red => "#DC2626",
            TrafficLight::Orange => "#F59E0B",
            TrafficLight::Green => "#16A34A",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficLight::Red => "red",
            TrafficLight::Orange => "orange",
            TrafficLight::Green => "green",
        }
    }
}

impl fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DARK_GREEN_HEX: &str = "#166534";

/// Short label for a recommendation priority, e.g. "P1"
pub fn priority_label(priority: u8) -> String {
    format!("P{}", priority)
}

/// Hex color for a recommendation priority badge
pub fn priority_color(priority: u8) -> &'static str {
    match priority {
        1 => TrafficLight::Red.hex(),
        2 => TrafficLight::Orange.hex(),
        _ => DARK_GREEN_HEX,
    }
}

/// Scores are always displayed with one decimal
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_colors() {
        assert_eq!(RiskLevel::Low.color(), RiskColor::Green);
        assert_eq!(RiskLevel::Medium.color(), RiskColor::Yellow);
        assert_eq!(RiskLevel::High.color(), RiskColor::Red);
    }

    #[test]
    fn test_priority_presentation() {
        assert_eq!(priority_label(2), "P2");
        assert_eq!(priority_color(1), TrafficLight::Red.hex());
        assert_eq!(priority_color(2), TrafficLight::Orange.hex());
        assert_eq!(priority_color(3), DARK_GREEN_HEX);
        assert_eq!(priority_color(4), DARK_GREEN_HEX);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(7.456, 2), 7.46);
        assert_eq!(round_to(3.25, 1), 3.3);
        assert_eq!(round_to(6.666_666, 1), 6.7);
        assert_eq!(format_score(5.0), "5.0");
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"medium\"");
        assert_eq!(serde_json::to_string(&TrafficLight::Orange).unwrap(), "\"orange\"");
    }
}
