//! Core domain types and error definitions for medic.
//!
//! This crate provides the types shared across the medic workspace:
//!
//! - [`ConsultError`] — Error taxonomy for a consultation request
//! - [`Analysis`], [`Condition`] — Symptom analysis as returned by the service
//! - [`HealthcareTips`], [`DoctorRecord`] — Tips and places results
//! - [`NewConsultation`] — A consultation record ready to be persisted
//! - [`SymptomAnalyzer`], [`DoctorFinder`], [`ConsultationStore`] — Service seams
//! - [`sanitize`] and [`validate_symptoms`] — Input cleaning and checks
//!
//! # Example
//!
//! ```rust
//! use medic_core::{sanitize, validate_symptoms};
//!
//! let text = sanitize("<b>fever</b> and chills!");
//! assert_eq!(text, "fever and chills!");
//! assert!(validate_symptoms(&text, 1000).is_ok());
//! ```

mod input;

pub use input::{sanitize, validate_symptoms};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while serving a consultation.
#[derive(Error, Debug)]
pub enum ConsultError {
    /// Symptom text was rejected before any external call.
    #[error("{0}")]
    InvalidInput(String),

    /// Symptom analysis call or reply parsing failed.
    #[error("Error analyzing symptoms: {0}")]
    Analysis(String),

    /// Healthcare tips call or reply parsing failed.
    #[error("Error getting healthcare tips: {0}")]
    Tips(String),

    /// Places search failed.
    #[error("Error finding nearby doctors: {0}")]
    DoctorLookup(String),

    /// Consultation write failed.
    #[error("Error saving consultation: {0}")]
    Persistence(String),
}

impl ConsultError {
    /// Returns true when the caller caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ConsultError::InvalidInput(_))
    }
}

/// A possible condition. Only `name` is read here; every other field the
/// service returns (e.g. `likelihood`) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Condition {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), details: Map::new() }
    }
}

/// Analysis of a symptom description, as returned by the generative service.
///
/// `conditions` is ordered from most to least likely. Severity, first aid,
/// remedies and any other fields stay in `details` exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub conditions: Vec<Condition>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Analysis {
    /// Condition names in likelihood order.
    pub fn condition_names(&self) -> Vec<String> {
        self.conditions.iter().map(|c| c.name.clone()).collect()
    }

    /// Name of the most likely condition, if any.
    pub fn top_condition(&self) -> Option<&str> {
        self.conditions.first().map(|c| c.name.as_str())
    }
}

/// Free-form tips returned by the generative service.
pub type HealthcareTips = Vec<serde_json::Value>;

/// A place record returned verbatim by the places service.
pub type DoctorRecord = serde_json::Value;

/// Geographic point used for doctor lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Formats as the `lat,lng` pair the places service expects.
    pub fn as_location(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// A consultation ready to be written. The store assigns id and timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct NewConsultation {
    pub user_id: String,
    pub symptoms: String,
    pub analysis: Analysis,
    pub recommended_doctors: Vec<DoctorRecord>,
}

/// Produces analyses and tips from symptom text.
#[async_trait]
pub trait SymptomAnalyzer: Send + Sync {
    /// Analyzes sanitized, validated symptom text.
    async fn analyze(&self, symptoms: &str) -> Result<Analysis, ConsultError>;

    /// Produces tips for the given conditions and symptoms.
    async fn healthcare_tips(
        &self,
        conditions: &[String],
        symptoms: &str,
    ) -> Result<HealthcareTips, ConsultError>;
}

/// Looks up practitioners near a point.
#[async_trait]
pub trait DoctorFinder: Send + Sync {
    /// Returns nearby doctors, filtered by `specialty` when given.
    async fn find_nearby(
        &self,
        point: GeoPoint,
        specialty: Option<&str>,
    ) -> Result<Vec<DoctorRecord>, ConsultError>;
}

/// Create-only persistence for consultations.
#[async_trait]
pub trait ConsultationStore: Send + Sync {
    /// Writes one consultation and returns its store-generated id.
    async fn create(&self, consultation: NewConsultation) -> Result<String, ConsultError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analysis_reply() {
        let json = r#"{
            "conditions": [{"name": "Flu", "likelihood": "High"}, {"name": "Cold", "likelihood": 0.4}],
            "severity": "Moderate",
            "immediate_attention": false,
            "first_aid": ["Rest"]
        }"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();

        assert_eq!(analysis.top_condition(), Some("Flu"));
        assert_eq!(analysis.condition_names(), vec!["Flu", "Cold"]);
        assert_eq!(analysis.details["severity"], "Moderate");
        assert_eq!(analysis.conditions[1].details["likelihood"], 0.4);
    }

    #[test]
    fn round_trip_keeps_unknown_fields() {
        let reply = serde_json::json!({
            "conditions": [{"name": "Flu", "likelihood": "High", "icd10": "J11"}],
            "severity": "mEdium",
            "immediate_attention": "unclear",
            "notes": "see GP"
        });
        let analysis: Analysis = serde_json::from_value(reply.clone()).unwrap();
        assert_eq!(serde_json::to_value(&analysis).unwrap(), reply);
    }

    #[test]
    fn condition_name_is_required() {
        assert!(serde_json::from_str::<Analysis>(r#"{"severity": "Low"}"#).is_err());
        assert!(serde_json::from_str::<Analysis>(r#"{"conditions": [{"likelihood": "High"}]}"#).is_err());
    }

    #[test]
    fn empty_conditions_have_no_top() {
        let analysis: Analysis = serde_json::from_str(r#"{"conditions": []}"#).unwrap();
        assert_eq!(analysis.top_condition(), None);
    }

    #[test]
    fn only_invalid_input_is_client_error() {
        assert!(ConsultError::InvalidInput("x".into()).is_client_error());
        assert!(!ConsultError::Analysis("x".into()).is_client_error());
        assert!(!ConsultError::Tips("x".into()).is_client_error());
        assert!(!ConsultError::DoctorLookup("x".into()).is_client_error());
        assert!(!ConsultError::Persistence("x".into()).is_client_error());
    }

    #[test]
    fn location_string() {
        let p = GeoPoint { lat: 12.9, lng: 77.6 };
        assert_eq!(p.as_location(), "12.9,77.6");
    }
}
