//! Consultation orchestration: sanitize, validate, analyze, tips, doctors, store.
//!
//! Stages run strictly in order and none is retried. The first failure ends
//! the request and discards anything already computed.

use medic_core::{sanitize, validate_symptoms, ConsultError, NewConsultation};
use tracing::info;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::ServerState;

const PREVIEW_CHARS: usize = 50;

/// First characters of the symptom text, for logs.
fn preview(symptoms: &str) -> String {
    symptoms.chars().take(PREVIEW_CHARS).collect()
}

/// Runs one consultation request end to end.
pub async fn run(state: &ServerState, req: AnalyzeRequest) -> Result<AnalyzeResponse, ConsultError> {
    let symptoms = sanitize(&req.symptoms);
    validate_symptoms(&symptoms, state.max_symptom_length)?;

    info!("Analyzing symptoms: {}...", preview(&symptoms));

    let analysis = state.analyzer.analyze(&symptoms).await?;

    let conditions = analysis.condition_names();
    let healthcare_tips = state.analyzer.healthcare_tips(&conditions, &symptoms).await?;

    // Doctor search uses the most likely condition as the specialty keyword.
    let doctors = match (req.location, analysis.top_condition()) {
        (Some(point), Some(specialty)) => {
            state.doctors.find_nearby(point, Some(specialty)).await?
        }
        _ => Vec::new(),
    };

    let consultation_id = match req.user_id {
        Some(user_id) => {
            let consultation = NewConsultation {
                user_id,
                symptoms,
                analysis: analysis.clone(),
                recommended_doctors: doctors.clone(),
            };
            Some(state.store.create(consultation).await?)
        }
        None => None,
    };

    Ok(AnalyzeResponse {
        success: true,
        analysis,
        healthcare_tips,
        doctors,
        consultation_id,
    })
}
