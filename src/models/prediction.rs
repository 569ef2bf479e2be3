//! Prediction model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Canonical crop identifier from the label encoder vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropClass(String);

impl CropClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CropClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CropClass {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Discrete bucket of the top class probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    VeryHigh,
    High,
    Medium,
    Low,
}

/// One entry of the top-N ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCrop {
    pub rank: usize,
    pub crop: CropClass,
    pub crop_localized: String,
    pub probability: f64,
    pub percentage: f64,
}

/// Cultivation guidance for a crop plus warnings derived from the readings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryProfile {
    pub planting_season: String,
    pub irrigation_recommendation: String,
    pub fertilization_recommendation: String,
    pub pest_control_tips: String,
    pub expected_yield: String,
    pub growth_duration: String,
    /// Warnings joined with "; ", empty when no rule fired
    pub climate_warnings: String,
}

/// Outcome of one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_crop: CropClass,
    pub predicted_crop_localized: String,
    pub confidence_score: f64,
    pub confidence_percentage: f64,
    pub confidence_level: ConfidenceTier,
    pub top_recommendations: Vec<RankedCrop>,
    pub all_probabilities: BTreeMap<CropClass, f64>,
    pub model_version: String,
    pub prediction_time_ms: f64,
    pub input_data: FeatureVector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<AdvisoryProfile>,
}

/// Probability as a percentage rounded to one decimal
pub fn to_percentage(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(to_percentage(0.92), 92.0);
        assert_eq!(to_percentage(0.12345), 12.3);
        assert_eq!(to_percentage(1.0), 100.0);
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(serde_json::to_value(ConfidenceTier::VeryHigh).unwrap(), "very_high");
        assert_eq!(serde_json::to_value(ConfidenceTier::Low).unwrap(), "low");
    }
}
