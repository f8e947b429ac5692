//! Nearby doctor lookup using the Places "nearby search" API.
//!
//! A non-success HTTP status, or a `status` other than `OK` / `ZERO_RESULTS`,
//! is a [`ConsultError::DoctorLookup`]. A successful reply without results is
//! an empty list.

use async_trait::async_trait;
use medic_config::PlacesSettings;
use medic_core::{ConsultError, DoctorFinder, DoctorRecord, GeoPoint};
use serde::Deserialize;
use tracing::{error, info};

const PLACE_TYPE: &str = "doctor";

/// Places search client, built once at startup.
pub struct PlacesClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    radius: u32,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<DoctorRecord>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

impl PlacesClient {
    pub fn new(settings: &PlacesSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: settings.url.clone(),
            api_key: settings.api_key.clone(),
            radius: settings.radius,
        }
    }

    /// Query parameters for one search. `keyword` only when a specialty is given.
    fn query(&self, point: GeoPoint, specialty: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("location", point.as_location()),
            ("radius", self.radius.to_string()),
            ("type", PLACE_TYPE.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(keyword) = specialty.filter(|s| !s.is_empty()) {
            params.push(("keyword", keyword.to_string()));
        }
        params
    }
}

/// Drops the request URL from the error; its query string carries the API key.
fn lookup_err(e: reqwest::Error) -> ConsultError {
    let e = e.without_url();
    error!("Places request failed: {}", e);
    ConsultError::DoctorLookup(e.to_string())
}

/// Extracts results from a decoded search reply.
fn into_results(response: NearbySearchResponse) -> Result<Vec<DoctorRecord>, ConsultError> {
    match response.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => Ok(response.results),
        Some(status) => Err(ConsultError::DoctorLookup(format!(
            "Places API status {}: {}",
            status,
            response.error_message.unwrap_or_default()
        ))),
    }
}

#[async_trait]
impl DoctorFinder for PlacesClient {
    async fn find_nearby(
        &self,
        point: GeoPoint,
        specialty: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, ConsultError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.query(point, specialty))
            .send()
            .await
            .map_err(lookup_err)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Places API error {}: {}", status, body);
            return Err(ConsultError::DoctorLookup(format!(
                "Places API error {}: {}",
                status, body
            )));
        }

        let decoded: NearbySearchResponse = response.json().await.map_err(lookup_err)?;

        let doctors = into_results(decoded)?;
        info!(
            "Found {} doctors near {} (specialty: {})",
            doctors.len(),
            point.as_location(),
            specialty.unwrap_or("-")
        );
        Ok(doctors)
    }
}
