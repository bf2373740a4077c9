/// LLM Client: the single point of entry for all Gemini API calls in CareerLaunch.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Model names are hardcoded in `generation`.
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod wire;

pub use wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

/// Public Gemini endpoint. Overridden by `GEMINI_API_BASE` (mock servers in tests).
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The single model client used by all services in CareerLaunch.
/// Wraps the Gemini `generateContent` endpoint and structured output helpers.
///
/// No retries: failures are reported to the user, who retries manually.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    /// `api_base` is `DEFAULT_API_BASE` in production and a mock server in tests.
    pub fn with_api_base(api_key: String, api_base: String) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/{API_VERSION}/models/{model}:generateContent",
            self.api_base
        )
    }

    /// Makes a raw `generateContent` call, returning the full response object.
    pub async fn call(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<wire::ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: model={model}, prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count.unwrap_or(0),
                usage.candidates_token_count.unwrap_or(0)
            );
        }

        Ok(parsed)
    }

    /// Calls the model and deserializes the text response as JSON.
    /// The request should either carry a response schema or instruct JSON-only output.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<T, LlmError> {
        let response = self.call(model, request).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
///
/// Prose around a fenced block is dropped; unfenced text is returned trimmed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_fence = &text[open + 3..];
    let body = after_fence
        .strip_prefix("json")
        .or_else(|| after_fence.strip_prefix("JSON"))
        .unwrap_or(after_fence);
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
