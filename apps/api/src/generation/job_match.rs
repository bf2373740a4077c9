//! Job match analysis: scores the generated profile against a pasted job description.

use serde::Deserialize;
use tracing::warn;

use crate::generation::prompts::{job_match_schema, JOB_MATCH_PROMPT_TEMPLATE};
use crate::generation::{ModelError, REASONING_MODEL};
use crate::llm_client::{GeminiClient, GenerateContentRequest, GenerationConfig};
use crate::models::career::JobMatchAnalysis;

/// Job descriptions are cut to this many characters before sending.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 5000;
const JOB_MATCH_THINKING_BUDGET: u32 = 4096;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJobMatch {
    match_score: f64,
    tailored_summary: String,
    missing_skills: Vec<String>,
    resume_improvements: Vec<String>,
    interview_focus: Vec<String>,
}

pub async fn analyze_job_match(
    llm: &GeminiClient,
    profile_context: &str,
    job_description: &str,
) -> Result<JobMatchAnalysis, ModelError> {
    let prompt = JOB_MATCH_PROMPT_TEMPLATE
        .replace("{profile}", profile_context)
        .replace("{job_description}", truncate_chars(job_description, MAX_JOB_DESCRIPTION_CHARS));

    let request = GenerateContentRequest {
        generation_config: Some(GenerationConfig::json_schema(
            job_match_schema(),
            JOB_MATCH_THINKING_BUDGET,
        )),
        ..GenerateContentRequest::from_prompt(&prompt)
    };

    let raw: RawJobMatch = llm.call_json(REASONING_MODEL, &request).await?;
    Ok(into_analysis(raw))
}

fn into_analysis(raw: RawJobMatch) -> JobMatchAnalysis {
    JobMatchAnalysis {
        match_score: clamp_score(raw.match_score),
        tailored_summary: raw.tailored_summary,
        missing_skills: raw.missing_skills,
        resume_improvements: raw.resume_improvements,
        interview_focus: raw.interview_focus,
    }
}

fn clamp_score(score: f64) -> u8 {
    if !score.is_finite() {
        warn!("Match score {score} is not a number, using 0");
        return 0;
    }
    let rounded = score.round();
    if !(0.0..=100.0).contains(&rounded) {
        warn!("Match score {score} outside 0-100, clamping");
    }
    rounded.clamp(0.0, 100.0) as u8
}

/// Prefix of at most `max` characters, cut on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    #[test]
    fn test_truncate_chars_short_text_unchanged() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 4), "héll");
    }

    fn parse(text: &str) -> Result<JobMatchAnalysis, serde_json::Error> {
        serde_json::from_str::<RawJobMatch>(text).map(into_analysis)
    }

    #[test]
    fn test_parse_job_match() {
        let text = json!({
            "matchScore": 72,
            "tailoredSummary": "Driven CS junior",
            "missingSkills": ["Kubernetes"],
            "resumeImprovements": ["Quantify impact"],
            "interviewFocus": ["System design"]
        })
        .to_string();
        let analysis = parse(&text).unwrap();
        assert_eq!(analysis.match_score, 72);
        assert_eq!(analysis.missing_skills, vec!["Kubernetes".to_string()]);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        assert_eq!(clamp_score(140.0), 100);
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(66.6), 67);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let text = json!({"matchScore": 50, "tailoredSummary": "x"}).to_string();
        assert!(parse(&text).is_err());
    }

    #[tokio::test]
    async fn test_malformed_response_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "```json\n{\"matchScore\": 10}\n```"}]}}]
            })))
            .mount(&server)
            .await;

        let llm = GeminiClient::with_api_base("k".to_string(), server.uri());
        let err = analyze_job_match(&llm, "Resume", "JD").await.unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[tokio::test]
    async fn test_job_description_is_truncated_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(|request: &Request| {
                let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
                if prompt.matches('~').count() != MAX_JOB_DESCRIPTION_CHARS {
                    return ResponseTemplate::new(400).set_body_json(json!({
                        "error": {"message": "job description was not truncated"}
                    }));
                }
                ResponseTemplate::new(200).set_body_json(json!({
                    "candidates": [{"content": {"parts": [{"text": json!({
                        "matchScore": 42,
                        "tailoredSummary": "s",
                        "missingSkills": [],
                        "resumeImprovements": [],
                        "interviewFocus": []
                    }).to_string()}]}}]
                }))
            })
            .expect(1)
            .mount(&server)
            .await;

        let llm = GeminiClient::with_api_base("k".to_string(), server.uri());
        let jd = "~".repeat(MAX_JOB_DESCRIPTION_CHARS + 2500);
        let analysis = analyze_job_match(&llm, "Resume", &jd).await.unwrap();
        assert_eq!(analysis.match_score, 42);
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": ""}]}}]
            })))
            .mount(&server)
            .await;

        let llm = GeminiClient::with_api_base("k".to_string(), server.uri());
        let err = analyze_job_match(&llm, "Resume", "JD").await.unwrap_err();
        assert_eq!(err, ModelError::EmptyResponse);
    }
}
