//! Data transfer objects for HTTP message serialization.

use medic_core::{Analysis, DoctorRecord, GeoPoint, HealthcareTips};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful reply of `POST /api/analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Analysis,
    pub healthcare_tips: HealthcareTips,
    pub doctors: Vec<DoctorRecord>,
    pub consultation_id: Option<String>,
}

/// Query of `GET /api/doctors`. Coordinates stay raw so that a bad
/// number surfaces as a server error rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct DoctorsQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub specialty: Option<String>,
}

/// Successful reply of `GET /api/doctors`.
#[derive(Debug, Serialize)]
pub struct DoctorsResponse {
    pub success: bool,
    pub doctors: Vec<DoctorRecord>,
}
