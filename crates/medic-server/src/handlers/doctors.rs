//! Direct nearby-doctor lookup endpoint.

use std::sync::Arc;

use axum::extract::{rejection::QueryRejection, Query, State};
use axum::Json;
use medic_core::GeoPoint;

use crate::dto::{DoctorsQuery, DoctorsResponse};
use crate::error::AppError;
use crate::ServerState;

fn coordinate(name: &str, raw: Option<&str>) -> Result<f64, AppError> {
    let raw = raw.ok_or_else(|| AppError::Internal(format!("missing '{}'", name)))?;
    raw.trim()
        .parse()
        .map_err(|_| AppError::Internal(format!("invalid '{}': {}", name, raw)))
}

/// Returns doctors near `lat`,`lng`, filtered by `specialty` when given.
pub async fn nearby(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<DoctorsQuery>, QueryRejection>,
) -> Result<Json<DoctorsResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Internal(e.body_text()))?;

    let point = GeoPoint {
        lat: coordinate("lat", query.lat.as_deref())?,
        lng: coordinate("lng", query.lng.as_deref())?,
    };

    let doctors = state
        .doctors
        .find_nearby(point, query.specialty.as_deref())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(DoctorsResponse { success: true, doctors }))
}
