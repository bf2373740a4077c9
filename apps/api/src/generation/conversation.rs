//! Chat turn: converts the transcript into Gemini turns and returns the reply text.

use crate::generation::{ModelError, REASONING_MODEL};
use crate::llm_client::prompts::CHAT_SYSTEM;
use crate::llm_client::wire::ThinkingConfig;
use crate::llm_client::{Content, GeminiClient, GenerateContentRequest, GenerationConfig};
use crate::models::session::{ChatMessage, Role};

const CHAT_THINKING_BUDGET: u32 = 32768;

/// Reply used when the model answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't generate a response.";

pub async fn send_chat_message(
    llm: &GeminiClient,
    history: &[ChatMessage],
    message: &str,
    context: Option<&str>,
) -> Result<String, ModelError> {
    let request = build_chat_request(history, message, context);
    let response = llm.call(REASONING_MODEL, &request).await?;
    Ok(response
        .text()
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
}

/// Prior transcript in order, then the new user message. The session context,
/// when present, rides in the system instruction.
pub fn build_chat_request(
    history: &[ChatMessage],
    message: &str,
    context: Option<&str>,
) -> GenerateContentRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "model",
            };
            Content::with_role(role, &m.content)
        })
        .collect();
    contents.push(Content::user(message));

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content::instruction(&system_instruction(context))),
        generation_config: Some(GenerationConfig {
            thinking_config: Some(ThinkingConfig {
                thinking_budget: CHAT_THINKING_BUDGET,
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn system_instruction(context: Option<&str>) -> String {
    match context.map(str::trim).filter(|c| !c.is_empty()) {
        Some(context) => format!("{CHAT_SYSTEM}\n\nStudent's Career Kit Context:\n{context}"),
        None => CHAT_SYSTEM.to_string(),
    }
}
