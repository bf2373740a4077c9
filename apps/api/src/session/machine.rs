//! The live session aggregate and its synchronous transitions.
//!
//! Model calls happen outside this type. A flow captures what it needs in a
//! ticket, releases the session, and hands the ticket back with the result.
//! Results whose ticket epoch no longer matches are dropped.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::tone::Tone;
use crate::generation::ModelError;
use crate::models::career::{CareerAssets, CompanyResearch, JobMatchAnalysis};
use crate::models::session::{Session, SessionPhase, Tab};

/// Role used for company research when the notes name none.
pub const DEFAULT_ROLE: &str = "Entry Level / Intern";
const TARGET_ROLE_PREFIX: &str = "Target Role: ";

/// Value of the first `Target Role: ` line, trimmed. Blank counts as absent.
pub fn extract_target_role(raw_notes: &str) -> Option<&str> {
    let start = raw_notes.find(TARGET_ROLE_PREFIX)? + TARGET_ROLE_PREFIX.len();
    let rest = &raw_notes[start..];
    let line = rest.split('\n').next().unwrap_or(rest).trim();
    (!line.is_empty()).then_some(line)
}

pub fn role_context(raw_notes: &str) -> &str {
    extract_target_role(raw_notes).unwrap_or(DEFAULT_ROLE)
}

/// Company insights handed to asset generation after a successful research step.
pub fn company_context(company_input: &str, research: &CompanyResearch) -> String {
    format!(
        "Company Input: {}\nCulture: {}\nWork Mode: {}",
        company_input.trim(),
        research.culture,
        research.work_mode
    )
}

/// Inputs captured when a generation flow starts.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    pub epoch: u64,
    pub raw_notes: String,
    pub tone: Tone,
    /// Set when the flow includes the research step.
    pub company: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobMatchTicket {
    pub epoch: u64,
    pub profile_context: String,
    pub job_description: String,
}

/// Partial update of the editable inputs. Absent fields are left alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputPatch {
    pub raw_notes: Option<String>,
    pub tone: Option<Tone>,
    pub company_input: Option<String>,
    pub target_job_description: Option<String>,
    pub active_tab: Option<Tab>,
}

/// The persisted session plus the flags that only exist in memory.
#[derive(Debug, Clone, Default)]
pub struct LiveSession {
    pub session: Session,
    /// Message from the last failed generation flow.
    pub last_error: Option<String>,
    pub analyzing_match: bool,
    pub chat_thinking: bool,
    epoch: u64,
}

impl LiveSession {
    /// Live state from a stored snapshot. A transient phase has no call behind it
    /// any more, so it is settled to `Complete` or `Idle`.
    pub fn restored(session: Session) -> Self {
        Self {
            session: settle_phase(session),
            ..Self::default()
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn apply_inputs(&mut self, patch: InputPatch) {
        let session = &mut self.session;
        if let Some(raw_notes) = patch.raw_notes {
            session.raw_notes = raw_notes;
        }
        if let Some(tone) = patch.tone {
            session.tone = tone;
        }
        if let Some(company_input) = patch.company_input {
            session.company_input = company_input;
        }
        if let Some(jd) = patch.target_job_description {
            session.target_job_description = jd;
        }
        if let Some(tab) = patch.active_tab {
            session.active_tab = tab;
        }
    }

    /// Starts a generation flow. Returns `None` when there are no notes to work from.
    pub fn begin_generation(&mut self) -> Result<Option<GenerationTicket>, AppError> {
        if self.session.app_state.is_busy() {
            return Err(AppError::Conflict(
                "A generation flow is already in progress".to_string(),
            ));
        }
        if self.session.raw_notes.trim().is_empty() {
            return Ok(None);
        }

        let company = self.session.company_input.trim();
        let company = (!company.is_empty()).then(|| company.to_string());

        self.last_error = None;
        self.session.company_research = None;
        self.session.app_state = if company.is_some() {
            SessionPhase::Researching
        } else {
            SessionPhase::Generating
        };
        info!("Generation flow started: {:?}", self.session.app_state);

        Ok(Some(GenerationTicket {
            epoch: self.epoch,
            raw_notes: self.session.raw_notes.clone(),
            tone: self.session.tone,
            role: role_context(&self.session.raw_notes).to_string(),
            company,
        }))
    }

    /// Records the research outcome and moves on to asset generation.
    /// Returns `false` when the flow is stale and must stop.
    pub fn apply_research(&mut self, ticket: &GenerationTicket, research: CompanyResearch) -> bool {
        if !self.is_current(ticket.epoch) {
            warn!("Dropping research result from stale epoch {}", ticket.epoch);
            return false;
        }
        self.session.company_research = Some(research);
        self.session.app_state = SessionPhase::Generating;
        info!("Generation flow: RESEARCHING -> GENERATING");
        true
    }

    /// Ends the flow. Assets are only replaced on success; a failure is recorded and handed back.
    pub fn finish_generation(
        &mut self,
        ticket: &GenerationTicket,
        result: Result<CareerAssets, ModelError>,
    ) -> Result<(), ModelError> {
        if !self.is_current(ticket.epoch) {
            warn!("Dropping generation result from stale epoch {}", ticket.epoch);
            return Ok(());
        }
        match result {
            Ok(assets) => {
                self.session.assets = Some(assets);
                self.session.app_state = SessionPhase::Complete;
                self.session.active_tab = if ticket.company.is_some() {
                    Tab::CompanyIntel
                } else {
                    Tab::Resume
                };
                info!("Generation flow: GENERATING -> COMPLETE");
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                self.session.app_state = SessionPhase::Error;
                info!("Generation flow: GENERATING -> ERROR ({e})");
                Err(e)
            }
        }
    }

    /// Starts a job match. `job_description`, when given, replaces the stored one first.
    pub fn begin_job_match(
        &mut self,
        job_description: Option<String>,
    ) -> Result<JobMatchTicket, AppError> {
        if self.analyzing_match {
            return Err(AppError::Conflict(
                "Job match analysis is already running".to_string(),
            ));
        }
        if let Some(jd) = job_description {
            self.session.target_job_description = jd;
        }
        let resume = match &self.session.assets {
            Some(assets) if !assets.resume_draft.trim().is_empty() => assets.resume_draft.clone(),
            _ => {
                return Err(AppError::Validation(
                    "Generate a resume before analyzing a job match".to_string(),
                ))
            }
        };
        if self.session.target_job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "Paste a job description to analyze".to_string(),
            ));
        }

        self.analyzing_match = true;
        Ok(JobMatchTicket {
            epoch: self.epoch,
            profile_context: format!(
                "Resume:\n{resume}\n\nAdditional Context from User:\n{}",
                self.session.raw_notes
            ),
            job_description: self.session.target_job_description.clone(),
        })
    }

    /// Stale results are dropped silently; failures leave the previous analysis in place.
    pub fn finish_job_match(
        &mut self,
        ticket: &JobMatchTicket,
        result: Result<JobMatchAnalysis, ModelError>,
    ) -> Result<(), AppError> {
        if !self.is_current(ticket.epoch) {
            warn!("Dropping job match result from stale epoch {}", ticket.epoch);
            return Ok(());
        }
        self.analyzing_match = false;
        let analysis = result.map_err(AppError::Analysis)?;
        self.session.job_match_analysis = Some(analysis);
        Ok(())
    }

    /// Back to defaults; every outstanding flow becomes stale.
    pub fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch + 1,
            ..Self::default()
        };
    }

    /// Replaces the session with a saved snapshot; every outstanding flow becomes stale.
    pub fn restore(&mut self, session: Session) {
        *self = Self {
            epoch: self.epoch + 1,
            ..Self::restored(session)
        };
    }
}

fn settle_phase(mut session: Session) -> Session {
    if session.app_state.is_busy() {
        session.app_state = if session.assets.as_ref().is_some_and(CareerAssets::is_complete) {
            SessionPhase::Complete
        } else {
            SessionPhase::Idle
        };
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::{sample_assets, sample_match, sample_research};

    fn with_notes(notes: &str, company: &str) -> LiveSession {
        let mut live = LiveSession::default();
        live.session.raw_notes = notes.to_string();
        live.session.company_input = company.to_string();
        live
    }

    #[test]
    fn test_role_extraction() {
        assert_eq!(
            extract_target_role("Target Role: Data Scientist\nSkills: SQL"),
            Some("Data Scientist")
        );
        assert_eq!(
            extract_target_role("Intro\nTarget Role:   UX Intern  \r\nmore"),
            Some("UX Intern")
        );
        assert_eq!(extract_target_role("Target Role: \nSkills"), None);
        assert_eq!(extract_target_role("Skills: SQL"), None);
        assert_eq!(role_context("Skills: SQL"), DEFAULT_ROLE);
    }

    #[test]
    fn test_role_extraction_uses_first_occurrence() {
        let notes = "Target Role: SDE Intern\nTarget Role: PM";
        assert_eq!(extract_target_role(notes), Some("SDE Intern"));
    }

    #[test]
    fn test_empty_notes_is_noop() {
        let mut live = with_notes("   ", "Acme");
        assert_eq!(live.begin_generation().unwrap(), None);
        assert_eq!(live.session.app_state, SessionPhase::Idle);
    }

    #[test]
    fn test_no_company_skips_research() {
        let mut live = with_notes("Target Role: SDE Intern", "  ");
        let ticket = live.begin_generation().unwrap().unwrap();
        assert_eq!(ticket.company, None);
        assert_eq!(live.session.app_state, SessionPhase::Generating);
    }

    #[test]
    fn test_company_starts_with_research() {
        let mut live = with_notes("Target Role: SDE Intern", " Acme ");
        let ticket = live.begin_generation().unwrap().unwrap();
        assert_eq!(ticket.company.as_deref(), Some("Acme"));
        assert_eq!(ticket.role, "SDE Intern");
        assert_eq!(live.session.app_state, SessionPhase::Researching);

        assert!(live.apply_research(&ticket, sample_research()));
        assert_eq!(live.session.app_state, SessionPhase::Generating);
        assert_eq!(live.session.company_research, Some(sample_research()));
    }

    #[test]
    fn test_second_generation_while_busy_conflicts() {
        let mut live = with_notes("notes", "");
        live.begin_generation().unwrap();
        assert!(matches!(live.begin_generation(), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_success_completes_with_assets() {
        let mut live = with_notes("notes", "Acme");
        let ticket = live.begin_generation().unwrap().unwrap();
        live.apply_research(&ticket, sample_research());
        live.finish_generation(&ticket, Ok(sample_assets())).unwrap();

        assert_eq!(live.session.app_state, SessionPhase::Complete);
        assert_eq!(live.session.active_tab, Tab::CompanyIntel);
        assert!(live.session.assets.as_ref().unwrap().is_complete());
    }

    #[test]
    fn test_failure_keeps_previous_assets() {
        let mut live = with_notes("notes", "");
        live.session.assets = Some(sample_assets());
        live.session.app_state = SessionPhase::Complete;

        let ticket = live.begin_generation().unwrap().unwrap();
        let err = live
            .finish_generation(
                &ticket,
                Err(ModelError::MissingField("coverLetter".to_string())),
            )
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingField(_)));

        assert_eq!(live.session.app_state, SessionPhase::Error);
        assert_eq!(live.session.assets, Some(sample_assets()));
        assert!(live.last_error.as_deref().unwrap().contains("coverLetter"));
    }

    #[test]
    fn test_regenerate_clears_research_and_error() {
        let mut live = with_notes("notes", "");
        live.session.company_research = Some(sample_research());
        live.session.app_state = SessionPhase::Error;
        live.last_error = Some("boom".to_string());

        live.begin_generation().unwrap().unwrap();
        assert_eq!(live.session.company_research, None);
        assert_eq!(live.last_error, None);
    }

    #[test]
    fn test_stale_results_are_dropped_after_reset() {
        let mut live = with_notes("notes", "Acme");
        let ticket = live.begin_generation().unwrap().unwrap();
        live.reset();

        assert!(!live.apply_research(&ticket, sample_research()));
        live.finish_generation(&ticket, Ok(sample_assets())).unwrap();
        assert_eq!(live.session, Session::default());
    }

    #[test]
    fn test_reset_twice_equals_reset_once() {
        let mut live = with_notes("notes", "Acme");
        live.session.assets = Some(sample_assets());
        live.reset();
        let once = live.session.clone();
        live.reset();
        assert_eq!(live.session, once);
        assert_eq!(once, Session::default());
    }

    #[test]
    fn test_restore_settles_transient_phase() {
        let mut busy = Session::default();
        busy.app_state = SessionPhase::Generating;
        assert_eq!(
            LiveSession::restored(busy.clone()).session.app_state,
            SessionPhase::Idle
        );

        busy.assets = Some(sample_assets());
        busy.app_state = SessionPhase::Researching;
        assert_eq!(
            LiveSession::restored(busy).session.app_state,
            SessionPhase::Complete
        );
    }

    #[test]
    fn test_restore_bumps_epoch() {
        let mut live = LiveSession::default();
        let before = live.epoch();
        live.restore(Session::default());
        assert!(!live.is_current(before));
    }

    #[test]
    fn test_job_match_requires_resume_and_description() {
        let mut live = with_notes("notes", "");
        assert!(matches!(
            live.begin_job_match(Some("JD".to_string())),
            Err(AppError::Validation(_))
        ));

        live.session.assets = Some(sample_assets());
        live.session.target_job_description = "  ".to_string();
        assert!(matches!(live.begin_job_match(None), Err(AppError::Validation(_))));
        assert!(!live.analyzing_match);
    }

    #[test]
    fn test_job_match_flow() {
        let mut live = with_notes("Rust, React", "");
        live.session.assets = Some(sample_assets());
        live.session.app_state = SessionPhase::Complete;

        let ticket = live.begin_job_match(Some("Backend intern".to_string())).unwrap();
        assert!(live.analyzing_match);
        assert!(ticket.profile_context.starts_with("Resume:\n# Jane Doe"));
        assert!(ticket
            .profile_context
            .ends_with("Additional Context from User:\nRust, React"));
        assert!(matches!(live.begin_job_match(None), Err(AppError::Conflict(_))));

        live.finish_job_match(&ticket, Ok(sample_match())).unwrap();
        assert!(!live.analyzing_match);
        assert_eq!(live.session.job_match_analysis, Some(sample_match()));
        assert_eq!(live.session.app_state, SessionPhase::Complete);
    }

    #[test]
    fn test_job_match_failure_clears_flag() {
        let mut live = with_notes("notes", "");
        live.session.assets = Some(sample_assets());
        let ticket = live.begin_job_match(Some("JD".to_string())).unwrap();

        let err = live
            .finish_job_match(&ticket, Err(ModelError::EmptyResponse))
            .unwrap_err();
        assert!(matches!(err, AppError::Analysis(ModelError::EmptyResponse)));
        assert!(!live.analyzing_match);
    }

    #[test]
    fn test_rejected_job_match_keeps_running_description() {
        let mut live = with_notes("notes", "");
        live.session.assets = Some(sample_assets());
        let running = live.begin_job_match(Some("JD-A".to_string())).unwrap();

        let err = live.begin_job_match(Some("JD-B".to_string())).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(live.session.target_job_description, "JD-A");
        assert_eq!(running.job_description, "JD-A");
    }

    #[test]
    fn test_apply_inputs_only_touches_present_fields() {
        let mut live = with_notes("keep me", "Acme");
        live.apply_inputs(InputPatch {
            tone: Some(Tone::Creative),
            active_tab: Some(Tab::Networking),
            ..InputPatch::default()
        });
        assert_eq!(live.session.raw_notes, "keep me");
        assert_eq!(live.session.company_input, "Acme");
        assert_eq!(live.session.tone, Tone::Creative);
        assert_eq!(live.session.active_tab, Tab::Networking);
    }
}
