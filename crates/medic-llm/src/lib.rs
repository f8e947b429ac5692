//! Generative-text access for symptom analysis.
//!
//! - [`GenerativeClient`] — OpenAI-compatible completion client (Gemini's `/openai` endpoint)
//! - [`TextGenerator`] — Single-prompt generation seam
//! - [`PromptAnalyzer`] — [`medic_core::SymptomAnalyzer`] built on any [`TextGenerator`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use medic_config::Settings;
//! use medic_core::SymptomAnalyzer;
//! use medic_llm::{GenerativeClient, PromptAnalyzer};
//!
//! let settings = Settings::from_env()?;
//! let analyzer = PromptAnalyzer::new(GenerativeClient::new(&settings.model));
//! let analysis = analyzer.analyze("headache and fever").await?;
//! ```

mod analyzer;
mod client;

pub use analyzer::PromptAnalyzer;
pub use client::{GenerativeClient, LlmMetrics, LlmResponse, TextGenerator};

use thiserror::Error;

/// Errors from the generative service.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport or service-reported failure.
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The reply carried no text.
    #[error("No response content")]
    EmptyResponse,

    /// The reply text was not the expected JSON.
    #[error("Failed to parse: {error} - content: {content}")]
    Parse { error: String, content: String },
}
