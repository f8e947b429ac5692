//! OpenAI-compatible completion client.
//!
//! Gemini serves the OpenAI chat-completions protocol under
//! `/v1beta/openai`, so the same SDK handles it with a different base URL.

use std::time::Instant;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use medic_config::ModelSettings;
use tracing::info;

use crate::LlmError;

/// Token usage and timing metrics from one call.
#[derive(Debug, Clone, Default)]
pub struct LlmMetrics {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub elapsed_ms: u64,
}

/// Complete reply from one call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub metrics: LlmMetrics,
}

/// Sends one prompt and returns the raw reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse, LlmError>;
}

fn llm_err(e: impl ToString) -> LlmError {
    LlmError::Request(e.to_string())
}

fn extract_response(
    response: CreateChatCompletionResponse,
    elapsed_ms: u64,
) -> Result<LlmResponse, LlmError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyResponse)?;

    let (input_tokens, output_tokens) = response
        .usage
        .map(|u| (u.prompt_tokens, u.completion_tokens))
        .unwrap_or((0, 0));

    info!(
        "LLM: {}ms, tokens: {}/{} (in/out)",
        elapsed_ms, input_tokens, output_tokens
    );

    Ok(LlmResponse {
        content,
        metrics: LlmMetrics { input_tokens, output_tokens, elapsed_ms },
    })
}

/// Client for the generative-text service, built once at startup.
pub struct GenerativeClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GenerativeClient {
    /// Creates a client from the model settings.
    pub fn new(settings: &ModelSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(&settings.api_base)
            .with_api_key(&settings.api_key);

        info!(
            "GenerativeClient: model={}, base={}, api_key_len={}",
            settings.model,
            settings.api_base,
            settings.api_key.len()
        );

        Self {
            client: Client::with_config(config),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for GenerativeClient {
    #[allow(deprecated)]
    async fn generate(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();

        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(llm_err)?,
        )];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .messages(messages)
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(llm_err)?;
        extract_response(response, start.elapsed().as_millis() as u64)
    }
}
