//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use panorama::PanoramaError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<PanoramaError> for ApiError {
    fn from(err: PanoramaError) -> Self {
        let message = err.to_string();
        match err {
            PanoramaError::UnknownDimension(_) | PanoramaError::UnknownMetric(_) => {
                ApiError::NotFound(message)
            }
            PanoramaError::InvalidSelection(_)
            | PanoramaError::MissingColumn(_)
            | PanoramaError::Config(_) => ApiError::BadRequest(message),
            _ => {
                tracing::error!(error = %message, "request failed");
                ApiError::Internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panorama_errors_map_to_status() {
        let cases = [
            (PanoramaError::UnknownMetric("x".into()), StatusCode::NOT_FOUND),
            (PanoramaError::UnknownDimension("x".into()), StatusCode::NOT_FOUND),
            (PanoramaError::InvalidSelection("x".into()), StatusCode::BAD_REQUEST),
            (PanoramaError::EmptyData("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
