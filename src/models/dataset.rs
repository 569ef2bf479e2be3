//! Dataset distribution model

use serde::{Deserialize, Serialize};

use super::features::Feature;

/// One row of the training CSV
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRecord {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub label: String,
}

impl DatasetRecord {
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Nitrogen => self.nitrogen,
            Feature::Phosphorus => self.phosphorus,
            Feature::Potassium => self.potassium,
            Feature::Temperature => self.temperature,
            Feature::Humidity => self.humidity,
            Feature::Ph => self.ph,
            Feature::Rainfall => self.rainfall,
        }
    }
}

/// Five-number summary of one crop's values for one feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub crop: String,
    pub crop_localized: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDistribution {
    pub feature: Feature,
    pub title: String,
    pub by_crop: Vec<BoxStats>,
}

#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub total_records: usize,
    pub features: Vec<FeatureDistribution>,
}
