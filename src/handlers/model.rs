//! Model status handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::logic::model::ModelStatus;

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub model_version: String,
    #[serde(flatten)]
    pub status: ModelStatus,
}

/// Availability and serving stats of the crop model
pub async fn status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    Json(ModelStatusResponse {
        model_version: state.engine.model_version().to_string(),
        status: state.engine.model_status(),
    })
}
