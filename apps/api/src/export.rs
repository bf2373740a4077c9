//! Copy/print serialization of a single output tab.

use serde::Deserialize;

use crate::models::session::{Session, Tab};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Print,
}

/// Text of `tab` as the user would copy it. Empty when the tab has nothing yet.
pub fn content_for_tab(session: &Session, tab: Tab) -> String {
    if tab == Tab::CompanyIntel {
        return match &session.company_research {
            Some(research) => format!(
                "Company: {}\n\nCulture: {}\n\nWork Mode: {}\n\nSalary: {}\n\nAvailability: {}",
                session.company_input,
                research.culture,
                research.work_mode,
                research.salary,
                research.availability
            ),
            None => String::new(),
        };
    }

    let Some(assets) = &session.assets else {
        return String::new();
    };

    match tab {
        Tab::Resume => assets.resume_draft.clone(),
        Tab::CoverLetter => assets.cover_letter.clone(),
        Tab::InterviewPrep => assets.interview_prep.clone(),
        Tab::Linkedin => assets.linkedin_content.clone(),
        Tab::Networking => assets.networking_messages.clone(),
        Tab::SkillGap => format!(
            "{}\n\n---\n\n{}",
            assets.skill_gap_analysis, assets.ats_optimization
        ),
        Tab::JobMatch => match &session.job_match_analysis {
            Some(analysis) => format!(
                "Match Score: {}/100\n\nSummary for Application: {}",
                analysis.match_score, analysis.tailored_summary
            ),
            None => String::new(),
        },
        Tab::CompanyIntel => String::new(),
    }
}

/// Standalone HTML page for the browser's print dialog.
///
/// The text is escaped and kept in a pre-wrapped block so what prints is
/// exactly what was generated.
pub fn print_document(tab: Tab, content: &str) -> String {
    let title = if tab == Tab::Resume { "Resume" } else { "Document" };
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title} - CareerLaunch AI</title>
    <style>
      @page {{ margin: 20mm; }}
      body {{
        font-family: 'Inter', system-ui, -apple-system, sans-serif;
        padding: 40px;
        color: #1f2937;
        line-height: 1.6;
        max-width: 800px;
        margin: 0 auto;
      }}
      .document {{ white-space: pre-wrap; word-wrap: break-word; font-family: inherit; margin: 0; }}
      @media print {{
        body {{ -webkit-print-color-adjust: exact; padding: 0; }}
      }}
    </style>
  </head>
  <body>
    <pre class="document">{body}</pre>
  </body>
</html>
"#,
        body = escape_html(content)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::{sample_assets, sample_match, sample_research};

    fn complete_session() -> Session {
        Session {
            company_input: "Acme".to_string(),
            company_research: Some(sample_research()),
            assets: Some(sample_assets()),
            job_match_analysis: Some(sample_match()),
            ..Session::default()
        }
    }

    #[test]
    fn test_asset_tabs_return_their_field() {
        let session = complete_session();
        assert_eq!(content_for_tab(&session, Tab::Resume), "# Jane Doe\nCS Junior");
        assert_eq!(content_for_tab(&session, Tab::Networking), "Hi, I'm Jane");
    }

    #[test]
    fn test_skill_gap_includes_ats_section() {
        let session = complete_session();
        assert_eq!(
            content_for_tab(&session, Tab::SkillGap),
            "- Docker\n\n---\n\n- Keywords"
        );
    }

    #[test]
    fn test_job_match_and_company_intel_summaries() {
        let session = complete_session();
        assert_eq!(
            content_for_tab(&session, Tab::JobMatch),
            "Match Score: 81/100\n\nSummary for Application: Curious CS junior"
        );
        assert!(content_for_tab(&session, Tab::CompanyIntel)
            .starts_with("Company: Acme\n\nCulture: Builders\n\nWork Mode: Hybrid"));
    }

    #[test]
    fn test_company_intel_without_assets() {
        let session = Session {
            company_research: Some(sample_research()),
            ..Session::default()
        };
        assert!(!content_for_tab(&session, Tab::CompanyIntel).is_empty());
        assert!(content_for_tab(&session, Tab::Resume).is_empty());
    }

    #[test]
    fn test_print_document_escapes_and_titles() {
        let html = print_document(Tab::Resume, "<b>R&D</b>\n  indented");
        assert!(html.contains("<title>Resume - CareerLaunch AI</title>"));
        assert!(html.contains("&lt;b&gt;R&amp;D&lt;/b&gt;\n  indented"));

        let other = print_document(Tab::CoverLetter, "Dear team");
        assert!(other.contains("<title>Document - CareerLaunch AI</title>"));
    }
}
