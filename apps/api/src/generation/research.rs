//! Company research: search-grounded, tolerant of non-JSON answers.
//!
//! Search grounding cannot be combined with a response schema, so the model is
//! only asked for JSON. Anything unparseable degrades to raw text in `culture`.

use serde_json::{Map, Value};
use tracing::warn;

use crate::generation::prompts::RESEARCH_PROMPT_TEMPLATE;
use crate::generation::ModelError;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::wire::Tool;
use crate::llm_client::{strip_json_fences, Content, GeminiClient, GenerateContentRequest};
use crate::models::career::CompanyResearch;

pub const RESEARCH_MODEL: &str = "gemini-2.5-flash";

const NOT_FOUND: &str = "Information not found.";
const UNKNOWN: &str = "Unknown";

pub async fn research_company(
    llm: &GeminiClient,
    company: &str,
    role_context: &str,
) -> Result<CompanyResearch, ModelError> {
    let prompt = RESEARCH_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{role}", role_context)
        .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION);

    let request = GenerateContentRequest {
        contents: vec![Content::user(&prompt)],
        tools: vec![Tool::google_search()],
        ..Default::default()
    };

    let response = llm.call(RESEARCH_MODEL, &request).await?;
    Ok(parse_research(
        response.text().as_deref(),
        response.grounding_sources(),
    ))
}

/// Maps the model's answer onto `CompanyResearch`. Never fails.
///
/// An absent answer is treated as `{}` (every field "not found").
pub fn parse_research(text: Option<&str>, sources: Vec<String>) -> CompanyResearch {
    let raw = text.unwrap_or("{}");

    match serde_json::from_str::<Value>(strip_json_fences(raw)) {
        Ok(Value::Object(fields)) => CompanyResearch {
            culture: field_text(&fields, "culture"),
            work_mode: field_text(&fields, "workMode"),
            salary: field_text(&fields, "salary"),
            availability: field_text(&fields, "availability"),
            sources,
        },
        parsed => {
            if let Err(e) = &parsed {
                warn!("Failed to parse company research JSON, falling back to raw text: {e}");
            } else {
                warn!("Company research was JSON but not an object, falling back to raw text");
            }
            let culture = if raw.trim().is_empty() {
                "Could not parse research.".to_string()
            } else {
                raw.trim().to_string()
            };
            CompanyResearch {
                culture,
                work_mode: UNKNOWN.to_string(),
                salary: UNKNOWN.to_string(),
                availability: UNKNOWN.to_string(),
                sources,
            }
        }
    }
}

fn field_text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => NOT_FOUND.to_string(),
        Some(other) => other.to_string(),
    }
}
