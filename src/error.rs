use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// Raised while building a limiter from user supplied settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max attempts must be at least 1")]
    ZeroMaxAttempts,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("action must not be empty")]
    EmptyAction,

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("failed to encode metrics: {0}")]
    Metrics(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::EmptyAction | ApiError::TooLong { .. } => StatusCode::BAD_REQUEST,
            ApiError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            error_message: self.to_string(),
        });

        (status, body).into_response()
    }
}
