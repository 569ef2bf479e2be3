//! Recommendation Engine
//!
//! validation → model call → confidence scoring → top-N ranking →
//! localization → advisory. Every failure comes back as an `EngineError`;
//! nothing escapes as a panic.

use std::time::Instant;

use serde_json::{Map, Value};

use crate::models::{
    to_percentage, ConfidenceTier, CropClass, PredictionResult, RankedCrop,
};
use super::model::{ModelAdapter, ModelError, ModelStatus};
use super::validation::{validate, ValidationError};
use super::{advisory, catalog};

pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {} validation error(s)", .0.len())]
    InvalidInput(Vec<ValidationError>),

    #[error("model unavailable")]
    ModelUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unavailable => EngineError::ModelUnavailable,
            other => EngineError::Internal(other.to_string()),
        }
    }
}

/// Per-request knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    pub top_n: usize,
    pub advisory: bool,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            advisory: true,
        }
    }
}

pub struct RecommendationEngine {
    model: ModelAdapter,
    model_version: String,
    defaults: RecommendOptions,
}

impl RecommendationEngine {
    pub fn new(model: ModelAdapter, model_version: impl Into<String>) -> Self {
        Self {
            model,
            model_version: model_version.into(),
            defaults: RecommendOptions::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: RecommendOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> RecommendOptions {
        self.defaults
    }

    pub fn is_ready(&self) -> bool {
        self.model.is_ready()
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model.status()
    }

    pub fn recommend(&self, raw: &Map<String, Value>) -> Result<PredictionResult, EngineError> {
        self.recommend_with(raw, self.defaults)
    }

    pub fn recommend_with(
        &self,
        raw: &Map<String, Value>,
        options: RecommendOptions,
    ) -> Result<PredictionResult, EngineError> {
        let features = validate(raw).map_err(|errors| {
            tracing::debug!("Rejected input: {} validation error(s)", errors.len());
            EngineError::InvalidInput(errors)
        })?;

        if !self.model.is_ready() {
            return Err(EngineError::ModelUnavailable);
        }

        let start = Instant::now();
        let prediction = self.model.predict(&features).map_err(|e| {
            if e != ModelError::Unavailable {
                tracing::error!("Prediction failed: {}", e);
            }
            EngineError::from(e)
        })?;
        let prediction_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let confidence = prediction
            .probabilities
            .iter()
            .map(|(_, p)| *p)
            .fold(0.0f64, f64::max);
        let tier = ConfidenceTier::from_score(confidence);
        let top_n = options.top_n.clamp(1, prediction.probabilities.len().max(1));
        let localized = catalog::localize(prediction.label.as_str()).to_string();

        tracing::info!(
            "Prediction: {} ({:.2}%, {})",
            localized,
            confidence * 100.0,
            tier.label()
        );

        Ok(PredictionResult {
            advisory: options
                .advisory
                .then(|| advisory::advise(prediction.label.as_str(), &features)),
            top_recommendations: rank_top_n(&prediction.probabilities, top_n),
            all_probabilities: prediction.probabilities.into_iter().collect(),
            predicted_crop: prediction.label,
            predicted_crop_localized: localized,
            confidence_score: confidence,
            confidence_percentage: to_percentage(confidence),
            confidence_level: tier,
            model_version: self.model_version.clone(),
            prediction_time_ms,
            input_data: features,
        })
    }
}

/// Highest-probability classes first. The sort is stable, so ties keep the
/// class enumeration order.
pub fn rank_top_n(probabilities: &[(CropClass, f64)], n: usize) -> Vec<RankedCrop> {
    let mut ordered: Vec<&(CropClass, f64)> = probabilities.iter().collect();
    ordered.sort_by(|a, b| b.1.total_cmp(&a.1));

    ordered
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, (crop, probability))| RankedCrop {
            rank: i + 1,
            crop_localized: catalog::localize(crop.as_str()).to_string(),
            crop: crop.clone(),
            probability: *probability,
            percentage: to_percentage(*probability),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use crate::logic::model::{ClassifierOutput, CropClassifier};
    use crate::models::{Feature, FEATURE_COUNT};

    struct Stub {
        classes: Vec<CropClass>,
        output: Result<ClassifierOutput, ModelError>,
        calls: Arc<AtomicUsize>,
    }

    impl CropClassifier for Stub {
        fn classes(&self) -> &[CropClass] {
            &self.classes
        }

        fn predict(&self, _row: &[f32; FEATURE_COUNT]) -> Result<ClassifierOutput, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.output.clone()
        }
    }

    fn engine_with(
        names: &[&str],
        output: Result<ClassifierOutput, ModelError>,
    ) -> (RecommendationEngine, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let stub = Stub {
            classes: names.iter().map(|n| CropClass::from(*n)).collect(),
            output,
            calls: calls.clone(),
        };
        (
            RecommendationEngine::new(ModelAdapter::ready(Box::new(stub)), "1.0"),
            calls,
        )
    }

    fn rice_engine() -> (RecommendationEngine, Arc<AtomicUsize>) {
        engine_with(
            &["cotton", "maize", "rice"],
            Ok(ClassifierOutput {
                label_index: 2,
                probabilities: vec![0.03, 0.05, 0.92],
            }),
        )
    }

    fn input() -> Map<String, Value> {
        json!({
            "N": 90, "P": 42, "K": 43,
            "temperature": 36.0, "humidity": 82.0,
            "ph": 6.5, "rainfall": 202.9
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_recommend_rice() {
        let (engine, calls) = rice_engine();
        let result = engine.recommend(&input()).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.predicted_crop.as_str(), "rice");
        assert_eq!(result.predicted_crop_localized, "Arroz");
        assert_eq!(result.confidence_score, 0.92);
        assert_eq!(result.confidence_percentage, 92.0);
        assert_eq!(result.confidence_level, ConfidenceTier::VeryHigh);
        assert_eq!(result.model_version, "1.0");
        assert_eq!(result.input_data.temperature, 36.0);

        let ranking: Vec<(usize, &str, f64)> = result
            .top_recommendations
            .iter()
            .map(|r| (r.rank, r.crop.as_str(), r.percentage))
            .collect();
        assert_eq!(ranking, vec![(1, "rice", 92.0), (2, "maize", 5.0), (3, "cotton", 3.0)]);

        assert_eq!(result.all_probabilities.len(), 3);
        assert_eq!(result.all_probabilities[&CropClass::from("maize")], 0.05);
    }

    #[test]
    fn test_advisory_included_by_default() {
        let (engine, _) = rice_engine();
        let advisory = engine.recommend(&input()).unwrap().advisory.unwrap();
        assert_eq!(advisory.growth_duration, "120-150 días");
        assert!(advisory.climate_warnings.starts_with("Temperatura alta"));
        assert!(advisory.climate_warnings.contains("Humedad alta"));
    }

    #[test]
    fn test_options_override_defaults() {
        let (engine, _) = rice_engine();
        let result = engine
            .recommend_with(&input(), RecommendOptions { top_n: 10, advisory: false })
            .unwrap();
        assert!(result.advisory.is_none());
        assert_eq!(result.top_recommendations.len(), 3);

        let result = engine
            .recommend_with(&input(), RecommendOptions { top_n: 0, advisory: true })
            .unwrap();
        assert_eq!(result.top_recommendations.len(), 1);
    }

    #[test]
    fn test_invalid_input_skips_model() {
        let (engine, calls) = rice_engine();
        let mut raw = input();
        raw.remove("N");
        raw.remove("rainfall");

        match engine.recommend(&raw) {
            Err(EngineError::InvalidInput(errors)) => {
                let fields: Vec<Feature> = errors.iter().map(|e| e.field()).collect();
                assert_eq!(fields, vec![Feature::Nitrogen, Feature::Rainfall]);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, ValidationError::MissingField { .. })));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unavailable_model() {
        let engine = RecommendationEngine::new(ModelAdapter::unavailable("no artifact"), "1.0");
        assert_eq!(engine.recommend(&input()).unwrap_err(), EngineError::ModelUnavailable);
    }

    #[test]
    fn test_invalid_input_reported_before_unavailable() {
        let engine = RecommendationEngine::new(ModelAdapter::unavailable("no artifact"), "1.0");
        let mut raw = input();
        raw.insert("ph".to_string(), json!(42));
        assert!(matches!(engine.recommend(&raw), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn test_oracle_fault_is_internal() {
        let (engine, calls) = engine_with(
            &["rice"],
            Err(ModelError::Inference("session exploded".to_string())),
        );
        match engine.recommend(&input()) {
            Err(EngineError::Internal(msg)) => assert!(msg.contains("session exploded")),
            other => panic!("expected Internal, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_crop_keeps_canonical_name() {
        let (engine, _) = engine_with(
            &["quinoa", "rice"],
            Ok(ClassifierOutput {
                label_index: 0,
                probabilities: vec![0.7, 0.3],
            }),
        );
        let result = engine.recommend(&input()).unwrap();
        assert_eq!(result.predicted_crop_localized, "quinoa");
        assert_eq!(result.top_recommendations[0].crop_localized, "quinoa");
        assert_eq!(result.confidence_level, ConfidenceTier::Medium);
        assert_eq!(result.advisory.unwrap().planting_season, "");
    }

    #[test]
    fn test_confidence_exactly_high_bound() {
        let (engine, _) = engine_with(
            &["maize", "rice"],
            Ok(ClassifierOutput {
                label_index: 1,
                probabilities: vec![0.2, 0.8],
            }),
        );
        assert_eq!(engine.recommend(&input()).unwrap().confidence_level, ConfidenceTier::High);
    }

    #[test]
    fn test_ranking_stable_under_ties() {
        let probabilities = vec![
            (CropClass::from("banana"), 0.25),
            (CropClass::from("apple"), 0.5),
            (CropClass::from("mango"), 0.25),
        ];
        let ranked = rank_top_n(&probabilities, 3);
        let order: Vec<&str> = ranked.iter().map(|r| r.crop.as_str()).collect();
        assert_eq!(order, vec!["apple", "banana", "mango"]);
        assert_eq!(ranked[2].rank, 3);
    }
}
