//! Model Adapter
//!
//! Wraps the externally trained classifier (the oracle) and its label
//! encoder. The adapter is either `Ready` or `Unloaded`; a failed load at
//! startup leaves it `Unloaded` for the rest of the process lifetime.

pub mod encoder;
pub mod onnx;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{rank_importances, CropClass, FeatureImportance, FeatureVector, FEATURE_COUNT};

pub use encoder::LabelEncoder;
pub use onnx::OnnxClassifier;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("model is not available")]
    Unavailable,

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// ORACLE TRAIT
// ============================================================================

/// Raw oracle output for a single row
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    /// Index into `classes()` of the predicted label
    pub label_index: usize,
    /// One probability per class, in `classes()` order
    pub probabilities: Vec<f64>,
}

/// Deterministic classifier over the seven features.
///
/// Implementations must be safe to call from several request tasks at once,
/// either because they are reentrant or because they serialize internally.
pub trait CropClassifier: Send + Sync {
    fn classes(&self) -> &[CropClass];
    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<ClassifierOutput, ModelError>;

    /// Trained importances in feature column order, when the artifact ships them
    fn feature_importances(&self) -> Option<[f64; FEATURE_COUNT]> {
        None
    }
}

/// Index of the first maximum
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Unmarshalled prediction
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: CropClass,
    /// Aligned to the fixed class enumeration
    pub probabilities: Vec<(CropClass, f64)>,
}

pub enum ModelState {
    Unloaded { reason: String },
    Ready(Box<dyn CropClassifier>),
}

/// Availability report for operators
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub model_path: Option<String>,
    pub class_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub inference_count: u64,
    pub avg_latency_ms: f64,
    /// Least important first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_importances: Option<Vec<FeatureImportance>>,
}

pub struct ModelAdapter {
    state: ModelState,
    model_path: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl ModelAdapter {
    /// Load classifier and encoder artifacts. Never fails; a load error is
    /// logged and captured as `Unloaded`.
    pub fn load(model_path: &Path, encoder_path: &Path) -> Self {
        let loaded = LabelEncoder::load(encoder_path)
            .and_then(|encoder| OnnxClassifier::load(model_path, encoder));

        let mut adapter = match loaded {
            Ok(classifier) => {
                tracing::info!("Crop model loaded ({} classes)", classifier.classes().len());
                Self::ready(Box::new(classifier))
            }
            Err(e) => {
                tracing::error!("Crop model unavailable: {}", e);
                Self::unavailable(e.to_string())
            }
        };
        adapter.model_path = Some(model_path.display().to_string());
        adapter
    }

    pub fn ready(classifier: Box<dyn CropClassifier>) -> Self {
        Self {
            state: ModelState::Ready(classifier),
            model_path: None,
            loaded_at: Some(Utc::now()),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unloaded { reason: reason.into() },
            model_path: None,
            loaded_at: None,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    /// Fixed class enumeration; empty while unloaded
    pub fn classes(&self) -> &[CropClass] {
        match &self.state {
            ModelState::Ready(classifier) => classifier.classes(),
            ModelState::Unloaded { .. } => &[],
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ModelError> {
        let classifier = match &self.state {
            ModelState::Ready(classifier) => classifier,
            ModelState::Unloaded { .. } => return Err(ModelError::Unavailable),
        };

        let row = features.to_row();
        let start = Instant::now();
        let output = catch_unwind(AssertUnwindSafe(|| classifier.predict(&row)))
            .map_err(|_| ModelError::Inference("classifier panicked".to_string()))??;

        let elapsed = start.elapsed();

        let classes = classifier.classes();
        if output.probabilities.len() != classes.len() {
            return Err(ModelError::Inference(format!(
                "expected {} probabilities, got {}",
                classes.len(),
                output.probabilities.len()
            )));
        }
        if output.probabilities.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ModelError::Inference("probabilities must be finite and non-negative".to_string()));
        }
        let total: f64 = output.probabilities.iter().sum();
        if (total - 1.0).abs() > 1e-3 {
            return Err(ModelError::Inference(format!("probabilities sum to {}", total)));
        }

        let label = classes
            .get(output.label_index)
            .cloned()
            .ok_or_else(|| ModelError::Inference(format!("unknown label index {}", output.label_index)))?;

        // Only well-formed predictions count towards the stats
        self.latency_sum_us
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(Prediction {
            label,
            probabilities: classes.iter().cloned().zip(output.probabilities).collect(),
        })
    }

    pub fn feature_importances(&self) -> Option<Vec<FeatureImportance>> {
        match &self.state {
            ModelState::Ready(classifier) => classifier.feature_importances().map(|i| rank_importances(&i)),
            ModelState::Unloaded { .. } => None,
        }
    }

    pub fn status(&self) -> ModelStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f64 / count as f64) / 1000.0 } else { 0.0 };

        ModelStatus {
            model_loaded: self.is_ready(),
            reason: match &self.state {
                ModelState::Unloaded { reason } => Some(reason.clone()),
                ModelState::Ready(_) => None,
            },
            model_path: self.model_path.clone(),
            class_count: self.classes().len(),
            loaded_at: self.loaded_at,
            inference_count: count,
            avg_latency_ms: avg,
            feature_importances: self.feature_importances(),
        }
    }
}
