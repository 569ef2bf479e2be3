//! Dataset distribution handler

use axum::{extract::{Query, State}, Json};
use serde::Deserialize;

use crate::{AppState, AppError, AppResult};
use crate::models::{DistributionResponse, Feature};

#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    pub feature: Option<String>,
}

/// Per-crop box statistics of the training data
pub async fn distribution(
    State(state): State<AppState>,
    Query(query): Query<DistributionQuery>,
) -> AppResult<Json<DistributionResponse>> {
    let summary = state
        .dataset
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Dataset summary not available".to_string()))?;

    let features = match query.feature {
        Some(key) => {
            let feature = Feature::from_key(&key)
                .ok_or_else(|| AppError::ValidationError(format!("Unknown feature: {}", key)))?;
            summary.feature(feature).cloned().into_iter().collect()
        }
        None => summary.features().to_vec(),
    };

    Ok(Json(DistributionResponse {
        total_records: summary.total_records(),
        features,
    }))
}
