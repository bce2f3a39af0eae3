use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::AppError;

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::App(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::App(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let error_message = match &self {
            // Process failures already carry the stderr text.
            ApiError::App(AppError::Command(msg)) => msg.clone(),
            other => other.to_string(),
        };

        if status_code.is_server_error() {
            tracing::error!("Request failed: {}", error_message);
        }

        (
            status_code,
            Json(json!({ "success": false, "error": error_message })),
        )
            .into_response()
    }
}
