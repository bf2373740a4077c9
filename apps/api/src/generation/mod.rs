// Generation Client: typed request/response wrappers around the hosted model.
// Implements: company research, asset bundle, job match, chat turn, speech.
// All model calls go through llm_client.

pub mod assets;
pub mod conversation;
pub mod job_match;
pub mod prompts;
pub mod research;
pub mod speech;
pub mod tone;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use thiserror::Error;

use crate::generation::tone::Tone;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::career::{CareerAssets, CompanyResearch, JobMatchAnalysis};
use crate::models::session::ChatMessage;

/// Model used for asset generation, job match and chat.
pub const REASONING_MODEL: &str = "gemini-3-pro-preview";

/// Typed failure of a single model operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Network or provider failure. Carries the provider's message verbatim.
    #[error("{0}")]
    Transport(String),

    #[error("No response generated from AI")]
    EmptyResponse,

    #[error("Malformed model output: {0}")]
    Parse(String),

    #[error("Model response is missing required field `{0}`")]
    MissingField(String),

    #[error("No audio generated")]
    NoAudio,
}

impl From<LlmError> for ModelError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Api { message, .. } => ModelError::Transport(message),
            LlmError::Http(e) => ModelError::Transport(e.to_string()),
            LlmError::Parse(e) => ModelError::Parse(e.to_string()),
            LlmError::EmptyContent => ModelError::EmptyResponse,
        }
    }
}

/// The five operations the session core needs from the model. Swap backends
/// (or inject a scripted fake in tests) without touching the orchestration.
///
/// Requests are idempotent but not deterministic.
#[async_trait]
pub trait CareerModel: Send + Sync {
    /// Never fails on unparseable output; only transport errors are returned.
    async fn research_company(
        &self,
        company: &str,
        role_context: &str,
    ) -> Result<CompanyResearch, ModelError>;

    async fn generate_assets(
        &self,
        raw_notes: &str,
        tone: Tone,
        company_context: &str,
    ) -> Result<CareerAssets, ModelError>;

    async fn analyze_job_match(
        &self,
        profile_context: &str,
        job_description: &str,
    ) -> Result<JobMatchAnalysis, ModelError>;

    /// Returns a fallback apology for an empty reply; errors only on transport failure.
    async fn send_chat_message(
        &self,
        history: &[ChatMessage],
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ModelError>;

    /// Base64 PCM (16-bit, mono, 24 kHz).
    async fn synthesize_speech(&self, text: &str) -> Result<String, ModelError>;
}

/// `CareerModel` backed by the Gemini API.
#[derive(Clone)]
pub struct GeminiModel {
    llm: GeminiClient,
}

impl GeminiModel {
    pub fn new(llm: GeminiClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CareerModel for GeminiModel {
    async fn research_company(
        &self,
        company: &str,
        role_context: &str,
    ) -> Result<CompanyResearch, ModelError> {
        research::research_company(&self.llm, company, role_context).await
    }

    async fn generate_assets(
        &self,
        raw_notes: &str,
        tone: Tone,
        company_context: &str,
    ) -> Result<CareerAssets, ModelError> {
        assets::generate_assets(&self.llm, raw_notes, tone, company_context).await
    }

    async fn analyze_job_match(
        &self,
        profile_context: &str,
        job_description: &str,
    ) -> Result<JobMatchAnalysis, ModelError> {
        job_match::analyze_job_match(&self.llm, profile_context, job_description).await
    }

    async fn send_chat_message(
        &self,
        history: &[ChatMessage],
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ModelError> {
        conversation::send_chat_message(&self.llm, history, message, context).await
    }

    async fn synthesize_speech(&self, text: &str) -> Result<String, ModelError> {
        speech::synthesize_speech(&self.llm, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_becomes_transport_with_provider_message() {
        let err: ModelError = LlmError::Api {
            status: 400,
            message: "API key not valid".to_string(),
        }
        .into();
        assert_eq!(err, ModelError::Transport("API key not valid".to_string()));
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[test]
    fn test_empty_content_becomes_empty_response() {
        let err: ModelError = LlmError::EmptyContent.into();
        assert_eq!(err, ModelError::EmptyResponse);
    }
}
