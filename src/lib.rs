//! Cropwise - Crop Recommendation Service
//!
//! Recommends a crop from soil/climate readings using a pre-trained
//! classifier, and relays live readings pushed by a field microcontroller.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         CROPWISE                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────┐   ┌─────────────┐  │
//! │  │  API      │──▶│ Recommendation Engine│──▶│ Model       │  │
//! │  │  (Axum)   │   │ validate/rank/advise │   │ Adapter     │  │
//! │  └─────┬─────┘   └──────────────────────┘   │ (ONNX)      │  │
//! │        │                                    └─────────────┘  │
//! │        ├──────────▶ Sensor Relay (last value)                │
//! │        └──────────▶ Dataset Summary (box stats)              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::{DatasetSummary, RecommendOptions, RecommendationEngine, ModelAdapter, SensorRelay};

/// Shared application state. Everything but the relay is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub relay: Arc<SensorRelay>,
    pub dataset: Option<Arc<DatasetSummary>>,
    pub config: config::Config,
}

impl AppState {
    /// Load model artifacts and the dataset. Load failures are logged and
    /// leave the corresponding feature unavailable.
    pub fn load(config: config::Config) -> Self {
        let model = ModelAdapter::load(&config.model_path, &config.encoder_path);
        let engine = RecommendationEngine::new(model, config.model_version.clone())
            .with_defaults(RecommendOptions {
                top_n: config.top_n,
                ..Default::default()
            });

        let dataset = match DatasetSummary::load(&config.dataset_path) {
            Ok(summary) => Some(Arc::new(summary)),
            Err(e) => {
                tracing::warn!("Dataset summary disabled: {}", e);
                None
            }
        };

        Self {
            engine: Arc::new(engine),
            relay: Arc::new(SensorRelay::new()),
            dataset,
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/recommendations", post(handlers::recommendations::recommend))
        .route("/api/v1/sensors", post(handlers::sensors::receive))
        .route("/api/v1/sensors/latest", get(handlers::sensors::latest))
        .route("/api/v1/dataset/distribution", get(handlers::dataset::distribution));

    // Paths used by deployed microcontroller firmware and the old dashboard poller
    let legacy_routes = Router::new()
        .route("/receive_arduino_data/", post(handlers::sensors::receive))
        .route("/api/obtener_ultimos_datos/", get(handlers::sensors::latest));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
        .merge(legacy_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
