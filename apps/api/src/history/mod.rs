// History Manager: explicit, immutable snapshots of the live session.
// Storage order is insertion order (newest prepended); listing re-sorts by timestamp.

pub mod handlers;

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::job_match::truncate_chars;
use crate::models::history::SavedSession;
use crate::models::session::Session;
use crate::session::controller::{SessionController, SessionView};
use crate::session::machine::extract_target_role;
use crate::store::SessionStore;

const UNTITLED: &str = "Untitled Role";
const FIRST_LINE_TITLE_CHARS: usize = 30;

/// Company, then target role, then the first line of the notes.
pub fn derive_title(session: &Session) -> String {
    let company = session.company_input.trim();
    if !company.is_empty() {
        return format!("{company} Application");
    }
    if let Some(role) = extract_target_role(&session.raw_notes) {
        return role.to_string();
    }
    let first_line = session.raw_notes.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return UNTITLED.to_string();
    }
    truncate_chars(first_line, FIRST_LINE_TITLE_CHARS).to_string()
}

/// Newest first. Equal timestamps keep storage order.
pub fn sorted_newest_first(records: &[SavedSession]) -> Vec<SavedSession> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

pub struct HistoryManager {
    store: SessionStore,
    records: Mutex<Vec<SavedSession>>,
    controller: Arc<SessionController>,
}

impl HistoryManager {
    pub fn new(
        store: SessionStore,
        records: Vec<SavedSession>,
        controller: Arc<SessionController>,
    ) -> Self {
        Self {
            store,
            records: Mutex::new(records),
            controller,
        }
    }

    pub async fn list(&self) -> Vec<SavedSession> {
        sorted_newest_first(&self.records.lock().await)
    }

    /// Snapshots the live session. Rejected when there are neither notes nor assets.
    pub async fn save(&self) -> Result<SavedSession, AppError> {
        let session = self.controller.snapshot().await.session;
        if session.raw_notes.trim().is_empty() && session.assets.is_none() {
            return Err(AppError::Validation(
                "Please enter some details or generate content before saving.".to_string(),
            ));
        }

        let now = Local::now();
        let record = new_record(session, now);

        let mut records = self.records.lock().await;
        let mut updated = Vec::with_capacity(records.len() + 1);
        updated.push(record.clone());
        updated.extend(records.iter().cloned());
        self.store.save_history(&updated).await?;
        *records = updated;

        info!("Saved session {} ({})", record.id, record.title);
        Ok(record)
    }

    /// Replaces the live session with the record's snapshot. The record is untouched.
    pub async fn load(&self, id: &str) -> Result<SessionView, AppError> {
        let data = {
            let records = self.records.lock().await;
            records
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.data.clone())
                .ok_or_else(|| AppError::NotFound(format!("Saved session {id} not found")))?
        };
        Ok(self.controller.restore(data).await)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().await;
        if !records.iter().any(|r| r.id == id) {
            return Err(AppError::NotFound(format!("Saved session {id} not found")));
        }
        let remaining: Vec<SavedSession> =
            records.iter().filter(|r| r.id != id).cloned().collect();
        self.store.save_history(&remaining).await?;
        *records = remaining;

        info!("Deleted saved session {id}");
        Ok(())
    }
}

fn new_record(data: Session, now: DateTime<Local>) -> SavedSession {
    SavedSession {
        id: Uuid::new_v4().to_string(),
        title: derive_title(&data),
        timestamp: now.timestamp_millis(),
        last_modified: now.format("%-m/%-d/%Y").to_string(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::generation::testing::{sample_assets, sample_research, ScriptedModel};
    use crate::models::session::{ChatMessage, SessionPhase, Tab};
    use crate::session::machine::InputPatch;
    use crate::store::draft::DraftMirror;
    use crate::store::memory::MemoryStore;

    fn session(notes: &str, company: &str) -> Session {
        Session {
            raw_notes: notes.to_string(),
            company_input: company.to_string(),
            ..Session::default()
        }
    }

    fn record(id: &str, timestamp: i64) -> SavedSession {
        SavedSession {
            id: id.to_string(),
            title: id.to_string(),
            timestamp,
            last_modified: "1/1/2026".to_string(),
            data: Session::default(),
        }
    }

    fn manager(records: Vec<SavedSession>) -> (HistoryManager, Arc<SessionController>, SessionStore) {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let controller = Arc::new(SessionController::new(
            None,
            Arc::new(ScriptedModel::new()),
            DraftMirror::spawn(store.clone()),
        ));
        (
            HistoryManager::new(store.clone(), records, controller.clone()),
            controller,
            store,
        )
    }

    #[test]
    fn test_title_derivation() {
        assert_eq!(derive_title(&session("Target Role: X", "Acme")), "Acme Application");
        assert_eq!(
            derive_title(&session("Target Role: SDE Intern\nSkills: Rust", "")),
            "SDE Intern"
        );
        assert_eq!(derive_title(&session("", "")), "Untitled Role");
        assert_eq!(
            derive_title(&session("I am a junior studying computer science at State\nmore", "")),
            "I am a junior studying compute"
        );
        assert_eq!(derive_title(&session("   \nSkills", "  ")), "Untitled Role");
    }

    #[test]
    fn test_record_dates() {
        let now = Local.with_ymd_and_hms(2026, 3, 7, 9, 30, 0).unwrap();
        let record = new_record(session("notes", ""), now);
        assert_eq!(record.last_modified, "3/7/2026");
        assert_eq!(record.timestamp, now.timestamp_millis());
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn test_listing_sorts_by_timestamp_stably() {
        let records = vec![record("b", 5), record("a", 9), record("c", 5), record("d", 1)];
        let ids: Vec<String> = sorted_newest_first(&records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_session() {
        let (history, _, store) = manager(vec![]);
        assert!(matches!(history.save().await, Err(AppError::Validation(_))));
        assert!(store.load_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_prepends_and_persists() {
        let (history, controller, store) = manager(vec![record("old", 1)]);
        controller
            .update_inputs(InputPatch {
                raw_notes: Some("Target Role: SDE Intern".to_string()),
                ..InputPatch::default()
            })
            .await;

        let saved = history.save().await.unwrap();
        assert_eq!(saved.title, "SDE Intern");

        let stored: Vec<String> = store
            .load_history()
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(stored, vec![saved.id.clone(), "old".to_string()]);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips_every_field() {
        let (history, controller, _) = manager(vec![]);
        let snapshot = Session {
            raw_notes: "Target Role: Data Scientist\nPython".to_string(),
            company_input: "Acme".to_string(),
            company_research: Some(sample_research()),
            assets: Some(sample_assets()),
            app_state: SessionPhase::Complete,
            active_tab: Tab::SkillGap,
            chat_messages: vec![ChatMessage::model("hi"), ChatMessage::user("yo")],
            target_job_description: "JD".to_string(),
            ..Session::default()
        };
        controller
            .mutate(|live| live.session = snapshot.clone())
            .await;

        let saved = history.save().await.unwrap();
        controller.new_session().await;
        let view = history.load(&saved.id).await.unwrap();

        assert_eq!(view.session, snapshot);
        assert_eq!(history.list().await[0].data, snapshot);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_record() {
        let (history, _, store) =
            manager(vec![record("c", 3), record("b", 2), record("a", 1)]);

        history.delete("b").await.unwrap();

        let ids: Vec<String> = history.list().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "a"]);
        let stored: Vec<String> = store
            .load_history()
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(stored, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_delete_and_load_unknown_id() {
        let (history, _, _) = manager(vec![record("a", 1)]);
        assert!(matches!(history.delete("zzz").await, Err(AppError::NotFound(_))));
        assert!(matches!(history.load("zzz").await, Err(AppError::NotFound(_))));
        assert_eq!(history.list().await.len(), 1);
    }
}
