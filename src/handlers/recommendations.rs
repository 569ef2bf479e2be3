//! Crop recommendation handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{AppState, AppError, AppResult};
use crate::logic::RecommendOptions;
use crate::models::PredictionResult;

#[derive(Debug, Deserialize, Default)]
pub struct RecommendQuery {
    pub top_n: Option<usize>,
    pub advisory: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// Recommend a crop for the submitted soil/climate readings
pub async fn recommend(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(raw) = payload?;
    let defaults = state.engine.defaults();
    let options = RecommendOptions {
        top_n: query.top_n.unwrap_or(defaults.top_n),
        advisory: query.advisory.unwrap_or(defaults.advisory),
    };

    // The ONNX session is locked for the duration of a run
    let engine = state.engine.clone();
    let result = tokio::task::spawn_blocking(move || engine.recommend_with(&raw, options))
        .await
        .map_err(|e| AppError::InternalError(format!("Prediction task failed: {}", e)))??;

    Ok(Json(RecommendationResponse {
        success: true,
        message: "Prediction completed successfully",
        result,
    }))
}
