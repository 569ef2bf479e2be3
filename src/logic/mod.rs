//! Core logic: validation, model adapter, recommendation engine, relay.

pub mod validation;
pub mod model;
pub mod tiers;
pub mod catalog;
pub mod advisory;
pub mod engine;
pub mod relay;
pub mod dataset;

pub use engine::{EngineError, RecommendOptions, RecommendationEngine};
pub use model::{ModelAdapter, ModelError};
pub use relay::SensorRelay;
pub use dataset::DatasetSummary;
pub use validation::ValidationError;
