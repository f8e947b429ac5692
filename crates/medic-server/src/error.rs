//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medic_core::ConsultError;
use serde::Serialize;
use tracing::error;

pub const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Application-level errors with HTTP status code mapping.
///
/// `Internal` details are logged, never returned to the caller.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl From<ConsultError> for AppError {
    fn from(err: ConsultError) -> Self {
        match err.is_client_error() {
            true => AppError::BadRequest(err.to_string()),
            false => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(detail) => {
                error!("Request failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
        };
        (status, Json(ErrorResponse { success: false, error: message })).into_response()
    }
}
