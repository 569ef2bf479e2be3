//! Sensor relay handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::{AppState, AppError, AppResult};
use crate::models::{LatestSensorResponse, SensorReadingRequest, SensorReadingResponse};

/// Store the latest microcontroller reading
pub async fn receive(
    State(state): State<AppState>,
    payload: Result<Json<SensorReadingRequest>, JsonRejection>,
) -> AppResult<Json<SensorReadingResponse>> {
    let Json(req) = payload?;
    let (Some(temperature), Some(humidity)) = (req.temperature, req.humidity) else {
        return Err(AppError::ValidationError(
            "Incomplete data: temperature and humidity are required".to_string(),
        ));
    };
    req.validate()?;

    let sample = state.relay.record(temperature, humidity);
    tracing::debug!("Sensor reading stored: {:.1}°C, {:.1}%", sample.temperature, sample.humidity);

    Ok(Json(SensorReadingResponse {
        status: "success",
        temperature: sample.temperature,
        humidity: sample.humidity,
    }))
}

/// Most recent reading, or nulls before the first one arrives
pub async fn latest(State(state): State<AppState>) -> Json<LatestSensorResponse> {
    Json(state.relay.latest().into())
}
