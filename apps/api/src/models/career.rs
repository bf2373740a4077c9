use serde::{Deserialize, Serialize};

/// The seven-document bundle produced by one generation call.
///
/// Always fully populated: `generation::assets` rejects responses with any field
/// missing or blank, so a `CareerAssets` value never exists half-built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerAssets {
    pub resume_draft: String,
    pub cover_letter: String,
    pub interview_prep: String,
    pub linkedin_content: String,
    pub networking_messages: String,
    pub skill_gap_analysis: String,
    pub ats_optimization: String,
}

impl CareerAssets {
    pub fn is_complete(&self) -> bool {
        [
            &self.resume_draft,
            &self.cover_letter,
            &self.interview_prep,
            &self.linkedin_content,
            &self.networking_messages,
            &self.skill_gap_analysis,
            &self.ats_optimization,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Search-grounded intel about the target company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResearch {
    pub culture: String,
    pub work_mode: String,
    pub salary: String,
    pub availability: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl CompanyResearch {
    /// Placeholder used when the research call itself failed.
    pub fn unavailable() -> Self {
        Self {
            culture: "Could not retrieve company info.".to_string(),
            work_mode: "Unknown".to_string(),
            salary: "Unknown".to_string(),
            availability: "Unknown".to_string(),
            sources: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchAnalysis {
    /// 0 to 100, clamped.
    pub match_score: u8,
    pub tailored_summary: String,
    pub missing_skills: Vec<String>,
    pub resume_improvements: Vec<String>,
    pub interview_focus: Vec<String>,
}
