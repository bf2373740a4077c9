use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::{CareerModel, ModelError};
use crate::models::career::CompanyResearch;
use crate::models::session::Session;
use crate::session::machine::{company_context, GenerationTicket, InputPatch, LiveSession};
use crate::store::draft::DraftMirror;
use crate::templates::find_template;

/// What the UI renders: the persisted session plus in-memory flags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub session: Session,
    pub error: Option<String>,
    pub is_analyzing_match: bool,
    pub is_chat_thinking: bool,
}

impl From<&LiveSession> for SessionView {
    fn from(live: &LiveSession) -> Self {
        Self {
            session: live.session.clone(),
            error: live.last_error.clone(),
            is_analyzing_match: live.analyzing_match,
            is_chat_thinking: live.chat_thinking,
        }
    }
}

/// Owns the single live session and sequences model calls against it.
///
/// The lock is only held for synchronous transitions, never across a model
/// call, so reads and unrelated edits stay responsive while a flow runs.
pub struct SessionController {
    live: Mutex<LiveSession>,
    model: Arc<dyn CareerModel>,
    drafts: DraftMirror,
}

impl SessionController {
    pub fn new(draft: Option<Session>, model: Arc<dyn CareerModel>, drafts: DraftMirror) -> Self {
        let live = draft.map(LiveSession::restored).unwrap_or_default();
        Self {
            live: Mutex::new(live),
            model,
            drafts,
        }
    }

    pub fn model(&self) -> &Arc<dyn CareerModel> {
        &self.model
    }

    pub async fn snapshot(&self) -> SessionView {
        SessionView::from(&*self.live.lock().await)
    }

    /// Reads from the live session under the lock.
    pub async fn read<R>(&self, f: impl FnOnce(&LiveSession) -> R) -> R {
        f(&*self.live.lock().await)
    }

    /// Applies `f` under the lock and mirrors the session to the draft key if it changed.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut LiveSession) -> R) -> R {
        let mut live = self.live.lock().await;
        let before = live.session.clone();
        let out = f(&mut live);
        if live.session != before {
            self.drafts.publish(&live.session);
        }
        out
    }

    pub async fn update_inputs(&self, patch: InputPatch) -> SessionView {
        self.mutate(|live| {
            live.apply_inputs(patch);
            SessionView::from(&*live)
        })
        .await
    }

    /// Validates and enters the first phase. `None` means there was nothing to generate from.
    pub async fn begin_generation(&self) -> Result<Option<GenerationTicket>, AppError> {
        self.mutate(LiveSession::begin_generation).await
    }

    /// Optional research, then asset generation. The outcome always lands in the session;
    /// a failed generation step is also returned.
    pub async fn run_generation(&self, ticket: GenerationTicket) -> Result<(), ModelError> {
        let company_context = match &ticket.company {
            Some(company) => {
                let (research, context) =
                    match self.model.research_company(company, &ticket.role).await {
                        Ok(research) => {
                            let context = company_context(company, &research);
                            (research, context)
                        }
                        Err(e) => {
                            warn!("Company research failed, continuing without it: {e}");
                            (CompanyResearch::unavailable(), String::new())
                        }
                    };
                if !self.mutate(|live| live.apply_research(&ticket, research)).await {
                    return Ok(());
                }
                context
            }
            None => String::new(),
        };

        let result = self
            .model
            .generate_assets(&ticket.raw_notes, ticket.tone, &company_context)
            .await;
        self.mutate(|live| live.finish_generation(&ticket, result))
            .await
    }

    /// Runs a whole generation flow and returns the settled session.
    pub async fn generate(&self) -> Result<SessionView, AppError> {
        if let Some(ticket) = self.begin_generation().await? {
            self.run_generation(ticket)
                .await
                .map_err(AppError::Generation)?;
        }
        Ok(self.snapshot().await)
    }

    pub async fn job_match(&self, job_description: Option<String>) -> Result<SessionView, AppError> {
        let ticket = self
            .mutate(|live| live.begin_job_match(job_description))
            .await?;
        let result = self
            .model
            .analyze_job_match(&ticket.profile_context, &ticket.job_description)
            .await;
        self.mutate(|live| live.finish_job_match(&ticket, result))
            .await?;
        Ok(self.snapshot().await)
    }

    /// Clears everything and removes the draft entry.
    pub async fn new_session(&self) -> SessionView {
        let mut live = self.live.lock().await;
        live.reset();
        self.drafts.clear();
        info!("Started a new session (epoch {})", live.epoch());
        SessionView::from(&*live)
    }

    pub async fn restore(&self, session: Session) -> SessionView {
        self.mutate(|live| {
            live.restore(session);
            info!("Restored saved session (epoch {})", live.epoch());
            SessionView::from(&*live)
        })
        .await
    }

    pub async fn apply_template(&self, key: &str) -> Result<SessionView, AppError> {
        let template =
            find_template(key).ok_or_else(|| AppError::NotFound(format!("Template {key} not found")))?;
        Ok(self
            .mutate(|live| {
                live.session.raw_notes = template.text.to_string();
                SessionView::from(&*live)
            })
            .await)
    }

    /// Waits until every draft write queued so far has reached storage.
    pub async fn flush_drafts(&self) {
        self.drafts.flush().await;
    }
}
