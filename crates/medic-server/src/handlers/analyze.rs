//! Symptom analysis endpoint.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::error;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Analyzes symptoms and optionally finds doctors and records the consultation.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        error!("Malformed analyze request: {}", e);
        AppError::Internal(e.body_text())
    })?;

    let response = services::consult::run(&state, req).await?;
    Ok(Json(response))
}
