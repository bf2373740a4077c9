//! Scripted `CareerModel` for orchestration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::generation::tone::Tone;
use crate::generation::{CareerModel, ModelError};
use crate::models::career::{CareerAssets, CompanyResearch, JobMatchAnalysis};
use crate::models::session::ChatMessage;

pub fn sample_assets() -> CareerAssets {
    CareerAssets {
        resume_draft: "# Jane Doe\nCS Junior".to_string(),
        cover_letter: "Dear Hiring Manager,".to_string(),
        interview_prep: "1. Tell me about yourself".to_string(),
        linkedin_content: "Aspiring SDE".to_string(),
        networking_messages: "Hi, I'm Jane".to_string(),
        skill_gap_analysis: "- Docker".to_string(),
        ats_optimization: "- Keywords".to_string(),
    }
}

pub fn sample_research() -> CompanyResearch {
    CompanyResearch {
        culture: "Builders".to_string(),
        work_mode: "Hybrid".to_string(),
        salary: "$30/h".to_string(),
        availability: "Summer interns".to_string(),
        sources: vec!["https://acme.example".to_string()],
    }
}

pub fn sample_match() -> JobMatchAnalysis {
    JobMatchAnalysis {
        match_score: 81,
        tailored_summary: "Curious CS junior".to_string(),
        missing_skills: vec!["Kubernetes".to_string()],
        resume_improvements: vec!["Add metrics".to_string()],
        interview_focus: vec!["Data structures".to_string()],
    }
}

/// One recorded call: operation name plus its main text argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub args: Vec<String>,
}

/// Queued results per operation; an empty queue returns a canned success.
#[derive(Default)]
pub struct ScriptedModel {
    pub research: Mutex<VecDeque<Result<CompanyResearch, ModelError>>>,
    pub assets: Mutex<VecDeque<Result<CareerAssets, ModelError>>>,
    pub job_match: Mutex<VecDeque<Result<JobMatchAnalysis, ModelError>>>,
    pub chat: Mutex<VecDeque<Result<String, ModelError>>>,
    pub speech: Mutex<VecDeque<Result<String, ModelError>>>,
    pub calls: Mutex<Vec<Call>>,
    /// When set, asset generation, job match and chat wait for a permit.
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_research(&self, result: Result<CompanyResearch, ModelError>) {
        self.research.lock().unwrap().push_back(result);
    }

    pub fn push_assets(&self, result: Result<CareerAssets, ModelError>) {
        self.assets.lock().unwrap().push_back(result);
    }

    pub fn push_job_match(&self, result: Result<JobMatchAnalysis, ModelError>) {
        self.job_match.lock().unwrap().push_back(result);
    }

    pub fn push_chat(&self, result: Result<String, ModelError>) {
        self.chat.lock().unwrap().push_back(result);
    }

    pub fn push_speech(&self, result: Result<String, ModelError>) {
        self.speech.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.op).collect()
    }

    fn record(&self, op: &'static str, args: &[&str]) {
        self.calls.lock().unwrap().push(Call {
            op,
            args: args.iter().map(|a| a.to_string()).collect(),
        });
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl CareerModel for ScriptedModel {
    async fn research_company(
        &self,
        company: &str,
        role_context: &str,
    ) -> Result<CompanyResearch, ModelError> {
        self.record("research_company", &[company, role_context]);
        let next = self.research.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(sample_research()))
    }

    async fn generate_assets(
        &self,
        raw_notes: &str,
        tone: Tone,
        company_context: &str,
    ) -> Result<CareerAssets, ModelError> {
        self.record("generate_assets", &[raw_notes, tone.label(), company_context]);
        self.wait_gate().await;
        let next = self.assets.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(sample_assets()))
    }

    async fn analyze_job_match(
        &self,
        profile_context: &str,
        job_description: &str,
    ) -> Result<JobMatchAnalysis, ModelError> {
        self.record("analyze_job_match", &[profile_context, job_description]);
        self.wait_gate().await;
        let next = self.job_match.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(sample_match()))
    }

    async fn send_chat_message(
        &self,
        history: &[ChatMessage],
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ModelError> {
        let history_len = history.len().to_string();
        self.record(
            "send_chat_message",
            &[&history_len, message, context.unwrap_or("")],
        );
        self.wait_gate().await;
        let next = self.chat.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(format!("echo: {message}")))
    }

    async fn synthesize_speech(&self, text: &str) -> Result<String, ModelError> {
        self.record("synthesize_speech", &[text]);
        let next = self.speech.lock().unwrap().pop_front();
        // Two samples: 0 and i16::MAX, little-endian.
        next.unwrap_or_else(|| Ok("AAD/fw==".to_string()))
    }
}
