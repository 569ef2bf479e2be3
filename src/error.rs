//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::logic::{EngineError, ValidationError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Validation errors
    InvalidInput(Vec<ValidationError>),
    ValidationError(String),

    // Resource errors
    NotFound(String),

    // Model errors
    ModelUnavailable,

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            AppError::InvalidInput(errors) => (
                StatusCode::BAD_REQUEST,
                "Invalid input data",
                Some(json!(errors)),
            ),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.as_str(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str(), None),
            AppError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Prediction model is not available",
                None,
            ),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let mut body = json!({
            "success": false,
            "error": error_message,
            "status": status.as_u16()
        });
        if let Some(details) = details {
            body["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(errors) => AppError::InvalidInput(errors),
            EngineError::ModelUnavailable => AppError::ModelUnavailable,
            EngineError::Internal(msg) => AppError::InternalError(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
