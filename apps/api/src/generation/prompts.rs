// All prompt templates and response schemas for the generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// Company research prompt. Replace: {company}, {role}, {json_only_instruction}
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"Research the target company: "{company}".

Using Google Search, find the following up-to-date information regarding roles related to: "{role}":
1. **Culture**: Summarize their mission, values, and what they look for in talent.
2. **Work Mode**: Are they Remote, Hybrid, or On-site? (Look for recent policies).
3. **Salary**: Estimated starting salary range for Freshers/Interns in this domain at this company.
4. **Availability**: Do they currently hire Interns or fresh graduates?

{json_only_instruction}
The JSON must have these keys: "culture", "workMode", "salary", "availability"."#;

/// Asset generation prompt.
/// Replace: {persona}, {raw_notes}, {tone_guide}, {company_context}
pub const ASSETS_PROMPT_TEMPLATE: &str = r#"{persona}

**Student's Raw Inputs (Skills, Experience, Desired Role):**
"{raw_notes}"

**Configuration:**
- {tone_guide}
{company_context}

**Tasks:**
1. **Resume Draft:** A structured, ATS-friendly resume layout (Markdown). Focus on highlighting projects, coursework, and soft skills since experience might be limited.
2. **Cover Letter:** A persuasive cover letter for the target role/company. Connect the student's academic background to real-world value.
3. **Interview Prep:** 10 likely interview questions for this specific fresher role (Technical & Behavioral) + "Star Method" answer guides.
4. **LinkedIn Content:** A punchy Headline and an engaging "About" section summary.
5. **Networking Messages:** 3 templates for cold messaging alumni or recruiters on LinkedIn (Connection request + Follow up).
6. **Skill Gap Analysis:** Based on the desired role, what standard industry skills is this student missing? Be specific.
7. **ATS Optimization:** A checklist of keywords and formatting tips to ensure this resume passes automated screeners for this role."#;

/// Line added to the asset prompt when research produced company context.
pub const COMPANY_CONTEXT_LINE: &str = "- **Target Company Insights:** {company_context} (Use this to tailor the Cover Letter and Motivation).";

/// Job match prompt. Replace: {profile}, {job_description}
pub const JOB_MATCH_PROMPT_TEMPLATE: &str = r#"You are an AI Recruiter Simulator.

**Context:**
I am a student/fresher applying for a job.

**My Profile/Resume Content:**
{profile}

**Target Job Description (JD):**
{job_description}

**Tasks:**
1. Calculate a **Match Score** (0-100).
2. Write a **Tailored Summary** I should use at the top of my resume for *this specific application*.
3. List **Missing Skills** that are in the JD but missing from my profile.
4. Suggest 3 specific **Resume Improvements** to get past the ATS for this job.
5. List 3 **Interview Focus Areas** I should prepare for based on this JD."#;

fn string_property(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

/// Response schema for asset generation: seven required markdown strings.
pub fn assets_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "resumeDraft": string_property("Markdown formatted Resume."),
            "coverLetter": string_property("Markdown formatted Cover Letter."),
            "interviewPrep": string_property("Markdown formatted Interview Question & Answer Guide."),
            "linkedinContent": string_property("Markdown formatted LinkedIn Headline and About section."),
            "networkingMessages": string_property("Markdown formatted outreach templates."),
            "skillGapAnalysis": string_property("Markdown report on missing skills."),
            "atsOptimization": string_property("Markdown report on keywords and ATS tips.")
        },
        "required": crate::generation::assets::REQUIRED_FIELDS
    })
}

/// Response schema for job match analysis.
pub fn job_match_schema() -> Value {
    let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "matchScore": { "type": "INTEGER" },
            "tailoredSummary": { "type": "STRING" },
            "missingSkills": string_list,
            "resumeImprovements": string_list,
            "interviewFocus": string_list
        },
        "required": ["matchScore", "tailoredSummary", "missingSkills", "resumeImprovements", "interviewFocus"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_schema_requires_all_seven_fields() {
        let schema = assets_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 7);
        for field in required {
            let name = field.as_str().unwrap();
            assert!(
                schema["properties"].get(name).is_some(),
                "required field {name} has no property"
            );
        }
    }

    #[test]
    fn test_job_match_schema_score_is_integer() {
        assert_eq!(job_match_schema()["properties"]["matchScore"]["type"], "INTEGER");
    }
}
