use serde::{Deserialize, Serialize};

use crate::generation::tone::Tone;
use crate::models::career::{CareerAssets, CompanyResearch, JobMatchAnalysis};

pub const GREETING: &str = "Hi! I'm your AI Career Coach. Tell me about your skills and the role you want, and I'll build your resume and prep kit!";

/// Where the primary generation flow is.
/// `Researching` and `Generating` are transient and only exist while a call is pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    #[default]
    Idle,
    Researching,
    Generating,
    Complete,
    Error,
}

impl SessionPhase {
    pub fn is_busy(self) -> bool {
        matches!(self, SessionPhase::Researching | SessionPhase::Generating)
    }
}

/// Output tab shown in the UI; also selects what export serializes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tab {
    #[default]
    Resume,
    CoverLetter,
    InterviewPrep,
    CompanyIntel,
    Linkedin,
    Networking,
    SkillGap,
    JobMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

/// Every persisted field of the live session.
///
/// This is both the draft snapshot and the `data` of a saved record. Fields
/// missing from stored JSON fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub raw_notes: String,
    pub tone: Tone,
    pub company_input: String,
    pub company_research: Option<CompanyResearch>,
    pub assets: Option<CareerAssets>,
    pub app_state: SessionPhase,
    pub active_tab: Tab,
    pub chat_messages: Vec<ChatMessage>,
    pub target_job_description: String,
    pub job_match_analysis: Option<JobMatchAnalysis>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            raw_notes: String::new(),
            tone: Tone::default(),
            company_input: String::new(),
            company_research: None,
            assets: None,
            app_state: SessionPhase::Idle,
            active_tab: Tab::Resume,
            chat_messages: vec![ChatMessage::model(GREETING)],
            target_job_description: String::new(),
            job_match_analysis: None,
        }
    }
}
