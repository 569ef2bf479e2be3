//! Label encoder vocabulary
//!
//! The encoder's class list fixes the order of the probability vector.
//! Accepted on-disk shapes: `["apple", "banana", ...]` or
//! `{"classes": [...], "feature_importances": [...]}` where the importances
//! are optional and listed in feature column order.

use std::path::Path;

use serde::Deserialize;

use crate::models::{CropClass, FEATURE_COUNT};
use super::ModelError;

#[derive(Deserialize)]
#[serde(untagged)]
enum EncoderFile {
    Plain(Vec<String>),
    Wrapped {
        classes: Vec<String>,
        #[serde(default)]
        feature_importances: Option<Vec<f64>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<CropClass>,
    feature_importances: Option<[f64; FEATURE_COUNT]>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<CropClass>) -> Result<Self, ModelError> {
        if classes.is_empty() {
            return Err(ModelError::Load("label encoder has no classes".to_string()));
        }
        {
            let mut seen = std::collections::HashSet::new();
            if let Some(dup) = classes.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(ModelError::Load(format!("duplicate class in label encoder: {}", dup)));
            }
        }
        Ok(Self { classes, feature_importances: None })
    }

    /// Attach the trained model's feature importances (column order)
    pub fn with_feature_importances(mut self, importances: Vec<f64>) -> Result<Self, ModelError> {
        let importances: [f64; FEATURE_COUNT] = importances.try_into().map_err(|v: Vec<f64>| {
            ModelError::Load(format!(
                "expected {} feature importances, got {}",
                FEATURE_COUNT,
                v.len()
            ))
        })?;
        if importances.iter().any(|i| !i.is_finite() || *i < 0.0) {
            return Err(ModelError::Load(
                "feature importances must be finite and non-negative".to_string(),
            ));
        }
        self.feature_importances = Some(importances);
        Ok(self)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: EncoderFile = serde_json::from_str(text)
            .map_err(|e| ModelError::Load(format!("Invalid label encoder: {}", e)))?;
        let (names, importances) = match file {
            EncoderFile::Plain(names) => (names, None),
            EncoderFile::Wrapped { classes, feature_importances } => (classes, feature_importances),
        };
        let encoder = Self::new(names.into_iter().map(CropClass::new).collect())?;
        match importances {
            Some(importances) => encoder.with_feature_importances(importances),
            None => Ok(encoder),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading label encoder from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::Load(format!("Label encoder not found: {}", path.display())));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Load(format!("Failed to read label encoder: {}", e)))?;
        Self::from_json(&text)
    }

    pub fn classes(&self) -> &[CropClass] {
        &self.classes
    }

    pub fn feature_importances(&self) -> Option<[f64; FEATURE_COUNT]> {
        self.feature_importances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_wrapped_formats() {
        let plain = LabelEncoder::from_json(r#"["apple", "banana", "rice"]"#).unwrap();
        let wrapped = LabelEncoder::from_json(r#"{"classes": ["apple", "banana", "rice"]}"#).unwrap();
        assert_eq!(plain, wrapped);
        assert_eq!(plain.classes()[2].as_str(), "rice");
        assert!(plain.feature_importances().is_none());
    }

    #[test]
    fn test_feature_importances() {
        let encoder = LabelEncoder::from_json(
            r#"{"classes": ["maize", "rice"],
                "feature_importances": [0.10, 0.14, 0.17, 0.07, 0.22, 0.05, 0.25]}"#,
        )
        .unwrap();
        assert_eq!(
            encoder.feature_importances(),
            Some([0.10, 0.14, 0.17, 0.07, 0.22, 0.05, 0.25])
        );
    }

    #[test]
    fn test_rejects_bad_feature_importances() {
        let short = r#"{"classes": ["rice"], "feature_importances": [0.5, 0.5]}"#;
        assert!(matches!(LabelEncoder::from_json(short), Err(ModelError::Load(_))));

        let negative = r#"{"classes": ["rice"], "feature_importances": [0.5, -0.1, 0.1, 0.1, 0.1, 0.1, 0.2]}"#;
        assert!(matches!(LabelEncoder::from_json(negative), Err(ModelError::Load(_))));
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(LabelEncoder::from_json("[]").is_err());
        assert!(LabelEncoder::from_json(r#"["rice", "rice"]"#).is_err());
        assert!(LabelEncoder::from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = LabelEncoder::load(Path::new("/nonexistent/encoder.json")).unwrap_err();
        assert!(matches!(err, ModelError::Load(_)));
    }
}
