//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::engine::DEFAULT_TOP_N;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Classifier artifact (ONNX)
    pub model_path: PathBuf,

    /// Label encoder vocabulary (JSON)
    pub encoder_path: PathBuf,

    /// Training dataset for distribution summaries (CSV)
    pub dataset_path: PathBuf,

    /// Version string echoed in predictions
    pub model_version: String,

    /// Default ranking depth
    pub top_n: usize,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            model_path: PathBuf::from("models/crop_model.onnx"),
            encoder_path: PathBuf::from("models/label_encoder.json"),
            dataset_path: PathBuf::from("static/data/Crop_recommendation.csv"),
            model_version: "1.0".to_string(),
            top_n: DEFAULT_TOP_N,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: lookup("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            encoder_path: lookup("ENCODER_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.encoder_path),

            dataset_path: lookup("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.dataset_path),

            model_version: lookup("MODEL_VERSION")
                .unwrap_or(defaults.model_version),

            top_n: lookup("TOP_N")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(defaults.top_n),

            environment: lookup("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
