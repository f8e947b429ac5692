//! Symptom analysis and healthcare tips over a [`TextGenerator`].

use async_trait::async_trait;
use medic_config::prompts;
use medic_core::{Analysis, ConsultError, HealthcareTips, SymptomAnalyzer};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::{LlmError, TextGenerator};

/// Analyzer that renders the fixed prompts and parses the JSON replies.
///
/// One attempt per call; a failure surfaces immediately.
pub struct PromptAnalyzer<G> {
    generator: G,
}

impl<G: TextGenerator> PromptAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    async fn ask<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let response = self.generator.generate(prompt).await?;
        debug!(
            "Structured response ({}ms, {} tokens out): {}",
            response.metrics.elapsed_ms, response.metrics.output_tokens, response.content
        );
        parse_json(&response.content)
    }
}

#[async_trait]
impl<G: TextGenerator> SymptomAnalyzer for PromptAnalyzer<G> {
    async fn analyze(&self, symptoms: &str) -> Result<Analysis, ConsultError> {
        let prompt = prompts::symptom_analysis(symptoms);
        let analysis: Analysis = self.ask(&prompt).await.map_err(|e| {
            error!("Symptom analysis failed: {}", e);
            ConsultError::Analysis(e.to_string())
        })?;

        info!(
            "Analysis: {} conditions, severity {}",
            analysis.conditions.len(),
            analysis.details.get("severity").unwrap_or(&serde_json::Value::Null)
        );
        Ok(analysis)
    }

    async fn healthcare_tips(
        &self,
        conditions: &[String],
        symptoms: &str,
    ) -> Result<HealthcareTips, ConsultError> {
        let prompt = prompts::healthcare_tips(conditions, symptoms);
        let tips: HealthcareTips = self.ask(&prompt).await.map_err(|e| {
            error!("Healthcare tips failed: {}", e);
            ConsultError::Tips(e.to_string())
        })?;

        info!("Generated {} healthcare tips", tips.len());
        Ok(tips)
    }
}

fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_code_fence(content)).map_err(|e| LlmError::Parse {
        error: e.to_string(),
        content: content.to_string(),
    })
}

/// Unwraps a reply wrapped in a Markdown code fence.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    match body.find('\n') {
        Some(idx) => body[idx + 1..].trim(),
        None => body.trim(),
    }
}
