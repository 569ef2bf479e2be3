//! Feature vector model
//!
//! The seven soil/climate readings fed to the classifier. Field order is
//! positional: the oracle consumes `[N, P, K, temperature, humidity, ph, rainfall]`.

use serde::{Deserialize, Serialize};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 7;

/// One named input of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "N")]
    Nitrogen,
    #[serde(rename = "P")]
    Phosphorus,
    #[serde(rename = "K")]
    Potassium,
    #[serde(rename = "temperature")]
    Temperature,
    #[serde(rename = "humidity")]
    Humidity,
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "rainfall")]
    Rainfall,
}

impl Feature {
    /// All features in model column order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Nitrogen,
        Feature::Phosphorus,
        Feature::Potassium,
        Feature::Temperature,
        Feature::Humidity,
        Feature::Ph,
        Feature::Rainfall,
    ];

    /// Request/CSV column name
    pub fn key(self) -> &'static str {
        match self {
            Feature::Nitrogen => "N",
            Feature::Phosphorus => "P",
            Feature::Potassium => "K",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
        }
    }

    /// Closed range of agronomically plausible values (min, max)
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Feature::Nitrogen => (0.0, 140.0),
            Feature::Phosphorus => (5.0, 145.0),
            Feature::Potassium => (5.0, 205.0),
            Feature::Temperature => (8.83, 43.7),
            Feature::Humidity => (14.3, 100.0),
            Feature::Ph => (3.5, 9.94),
            Feature::Rainfall => (20.2, 299.0),
        }
    }

    /// Chart title used by the dataset summary
    pub fn title(self) -> &'static str {
        match self {
            Feature::Nitrogen => "Nivel de Nitrógeno",
            Feature::Phosphorus => "Nivel de Fósforo",
            Feature::Potassium => "Nivel de Potasio",
            Feature::Temperature => "Temperatura",
            Feature::Humidity => "Nivel de humedad",
            Feature::Ph => "Nivel de pH",
            Feature::Rainfall => "Nivel de lluvia",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Validated input record. Only built by `logic::validation::validate`
/// (or tests), so every field is finite and in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
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
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
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

    /// Build from values in column order
    pub fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        Self { nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall }
    }

    /// Single-row model input in column order
    pub fn to_row(&self) -> [f32; FEATURE_COUNT] {
        Feature::ALL.map(|f| self.get(f) as f32)
    }
}

/// Contribution of one feature to the trained model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: Feature,
    pub importance: f64,
}

/// Pair importances (column order) with their features, least important first
pub fn rank_importances(importances: &[f64; FEATURE_COUNT]) -> Vec<FeatureImportance> {
    let mut ranked: Vec<FeatureImportance> = Feature::ALL
        .iter()
        .zip(importances)
        .map(|(&feature, &importance)| FeatureImportance { feature, importance })
        .collect();
    ranked.sort_by(|a, b| a.importance.total_cmp(&b.importance));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_follows_column_order() {
        let v = FeatureVector::from_ordered([90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
        assert_eq!(v.to_row(), [90.0, 42.0, 43.0, 20.8, 82.0, 6.5, 202.9]);
    }

    #[test]
    fn test_serde_uses_column_keys() {
        let v = FeatureVector::from_ordered([1.0, 5.0, 5.0, 20.0, 50.0, 7.0, 100.0]);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["N"], 1.0);
        assert_eq!(json["rainfall"], 100.0);
        assert_eq!(serde_json::to_value(Feature::Ph).unwrap(), "ph");
    }

    #[test]
    fn test_importances_sorted_ascending() {
        let ranked = rank_importances(&[0.10, 0.14, 0.17, 0.07, 0.22, 0.05, 0.25]);
        let order: Vec<Feature> = ranked.iter().map(|r| r.feature).collect();
        assert_eq!(
            order,
            vec![
                Feature::Ph,
                Feature::Temperature,
                Feature::Nitrogen,
                Feature::Phosphorus,
                Feature::Potassium,
                Feature::Humidity,
                Feature::Rainfall,
            ]
        );
        assert_eq!(ranked[6].importance, 0.25);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Feature::from_key("K"), Some(Feature::Potassium));
        assert_eq!(Feature::from_key("k"), None);
    }
}
