//! ONNX Runtime classifier
//!
//! Runs a scikit-learn crop classifier exported to ONNX (probabilities as a
//! plain tensor, no zipmap). Session access is serialized by a mutex because
//! `Session::run` needs exclusive access.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;

use crate::models::{CropClass, FEATURE_COUNT};
use super::{argmax, ClassifierOutput, CropClassifier, LabelEncoder, ModelError};

pub struct OnnxClassifier {
    session: Mutex<Session>,
    encoder: LabelEncoder,
    /// `[label, probabilities]` for sklearn exports, or just `[probabilities]`
    output_names: Vec<String>,
}

impl OnnxClassifier {
    pub fn load(model_path: &Path, encoder: LabelEncoder) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ModelError::Load(format!("Model not found: {}", model_path.display())));
        }

        let session = Session::builder()
            .map_err(|e| ModelError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Load(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        if output_names.is_empty() {
            return Err(ModelError::Load("Model defines no outputs".to_string()));
        }

        tracing::debug!("ONNX outputs: {:?}", output_names);

        Ok(Self {
            session: Mutex::new(session),
            encoder,
            output_names,
        })
    }
}

impl CropClassifier for OnnxClassifier {
    fn classes(&self) -> &[CropClass] {
        self.encoder.classes()
    }

    fn feature_importances(&self) -> Option<[f64; FEATURE_COUNT]> {
        self.encoder.feature_importances()
    }

    fn predict(&self, row: &[f32; FEATURE_COUNT]) -> Result<ClassifierOutput, ModelError> {
        let input = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), row.to_vec())
            .map_err(|e| ModelError::Inference(format!("Array error: {}", e)))?;
        let input_tensor = Tensor::from_array(input)
            .map_err(|e| ModelError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ModelError::Inference(format!("Inference failed: {}", e)))?;

        let proba_name = self
            .output_names
            .last()
            .ok_or_else(|| ModelError::Inference("No output defined".to_string()))?;
        let proba = outputs
            .get(proba_name.as_str())
            .ok_or_else(|| ModelError::Inference(format!("Missing output {}", proba_name)))?;
        let (_, data) = proba
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(format!("Extract error: {}", e)))?;
        let probabilities: Vec<f64> = data.iter().map(|&p| f64::from(p)).collect();

        let label_index = match self.output_names.first() {
            Some(label_name) if self.output_names.len() > 1 => outputs
                .get(label_name.as_str())
                .and_then(|label| label.try_extract_tensor::<i64>().ok())
                .and_then(|(_, labels)| labels.first().copied())
                .and_then(|l| usize::try_from(l).ok()),
            _ => None,
        };
        let label_index = match label_index {
            Some(i) => i,
            None => argmax(&probabilities)
                .ok_or_else(|| ModelError::Inference("Empty probability output".to_string()))?,
        };

        Ok(ClassifierOutput { label_index, probabilities })
    }
}
