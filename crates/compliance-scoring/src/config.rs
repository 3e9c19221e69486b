//! Scoring thresholds
//!
//! Defaults are the calibrated business values. Both report renderers must be
//! fed from the same [`ScoringConfig`] so their aggregates agree.

use crate::error::ScoringError;
use crate::levels::{RiskLevel, TrafficLight};
use serde::{Deserialize, Serialize};

/// Two-tier scale for weighted category and overall scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Scores at or above this are low risk
    pub low: f64,
    /// Scores at or above this (and below `low`) are medium risk
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 7.5,
            medium: 4.0,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score >= self.low {
            RiskLevel::Low
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Bands for raw answers and unweighted averages
///
/// Red covers everything below `red_max + 1`, so with the defaults 3.5 is red.
/// Orange is anything up to and including `orange_max`; 6.5 is green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficLightThresholds {
    pub red_max: u8,
    pub orange_max: u8,
}

impl Default for TrafficLightThresholds {
    fn default() -> Self {
        Self {
            red_max: 3,
            orange_max: 6,
        }
    }
}

impl TrafficLightThresholds {
    pub fn classify(&self, score: f64) -> TrafficLight {
        if score < f64::from(self.red_max) + 1.0 {
            TrafficLight::Red
        } else if score <= f64::from(self.orange_max) {
            TrafficLight::Orange
        } else {
            TrafficLight::Green
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub risk: RiskThresholds,
    pub traffic_light: TrafficLightThresholds,
    /// Subcategories scoring at or below this get a follow-on service suggestion
    pub service_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            risk: RiskThresholds::default(),
            traffic_light: TrafficLightThresholds::default(),
            service_threshold: 4.0,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let RiskThresholds { low, medium } = self.risk;
        if !low.is_finite() || !medium.is_finite() || medium > low {
            return Err(ScoringError::InvalidConfig(format!(
                "risk thresholds must be finite with medium <= low (medium={}, low={})",
                medium, low
            )));
        }

        let TrafficLightThresholds { red_max, orange_max } = self.traffic_light;
        if red_max >= orange_max {
            return Err(ScoringError::InvalidConfig(format!(
                "traffic light bands must satisfy red_max < orange_max (red_max={}, orange_max={})",
                red_max, orange_max
            )));
        }

        if !self.service_threshold.is_finite() {
            return Err(ScoringError::InvalidConfig(
                "service_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON config; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        let config: ScoringConfig = serde_json::from_str(json)
            .map_err(|e| ScoringError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
