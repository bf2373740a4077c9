//! Asset bundle generation: one structured call, all seven documents or nothing.

use serde_json::{Map, Value};

use crate::generation::prompts::{assets_schema, ASSETS_PROMPT_TEMPLATE, COMPANY_CONTEXT_LINE};
use crate::generation::tone::{tone_guide, Tone};
use crate::generation::{ModelError, REASONING_MODEL};
use crate::llm_client::prompts::COACH_PERSONA;
use crate::llm_client::{
    strip_json_fences, Content, GeminiClient, GenerateContentRequest, GenerationConfig,
};
use crate::models::career::CareerAssets;

const ASSETS_THINKING_BUDGET: u32 = 32768;

/// Wire names of the asset fields, in document order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "resumeDraft",
    "coverLetter",
    "interviewPrep",
    "linkedinContent",
    "networkingMessages",
    "skillGapAnalysis",
    "atsOptimization",
];

pub async fn generate_assets(
    llm: &GeminiClient,
    raw_notes: &str,
    tone: Tone,
    company_context: &str,
) -> Result<CareerAssets, ModelError> {
    let request = GenerateContentRequest {
        contents: vec![Content::user(&build_assets_prompt(
            raw_notes,
            tone,
            company_context,
        ))],
        generation_config: Some(GenerationConfig::json_schema(
            assets_schema(),
            ASSETS_THINKING_BUDGET,
        )),
        ..Default::default()
    };

    let response = llm.call(REASONING_MODEL, &request).await?;
    let text = response.text().ok_or(ModelError::EmptyResponse)?;
    parse_assets(&text)
}

fn build_assets_prompt(raw_notes: &str, tone: Tone, company_context: &str) -> String {
    let company_line = if company_context.trim().is_empty() {
        String::new()
    } else {
        COMPANY_CONTEXT_LINE.replace("{company_context}", company_context.trim())
    };

    ASSETS_PROMPT_TEMPLATE
        .replace("{persona}", COACH_PERSONA)
        .replace("{tone_guide}", &tone_guide(tone))
        .replace("{company_context}", &company_line)
        .replace("{raw_notes}", raw_notes)
}

/// Validates the model's JSON against the seven-field contract.
///
/// A missing, non-string or blank field fails the whole bundle.
pub fn parse_assets(text: &str) -> Result<CareerAssets, ModelError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| ModelError::Parse(e.to_string()))?;
    let fields = value
        .as_object()
        .ok_or_else(|| ModelError::Parse("expected a JSON object".to_string()))?;

    Ok(CareerAssets {
        resume_draft: required(fields, "resumeDraft")?,
        cover_letter: required(fields, "coverLetter")?,
        interview_prep: required(fields, "interviewPrep")?,
        linkedin_content: required(fields, "linkedinContent")?,
        networking_messages: required(fields, "networkingMessages")?,
        skill_gap_analysis: required(fields, "skillGapAnalysis")?,
        ats_optimization: required(fields, "atsOptimization")?,
    })
}

fn required(fields: &Map<String, Value>, key: &str) -> Result<String, ModelError> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ModelError::MissingField(key.to_string())),
    }
}
