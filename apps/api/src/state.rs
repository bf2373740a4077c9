use std::sync::Arc;

use crate::chat::ChatService;
use crate::generation::CareerModel;
use crate::history::HistoryManager;
use crate::models::history::SavedSession;
use crate::models::session::Session;
use crate::session::controller::SessionController;
use crate::speech::dictation::{DictationCapability, DictationRegistry};
use crate::speech::playback::{PlaybackController, SpeechCapability};
use crate::store::draft::DraftMirror;
use crate::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every service is built once here; there are no globals.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SessionController>,
    pub chat: Arc<ChatService>,
    pub history: Arc<HistoryManager>,
    pub dictation: Arc<DictationRegistry>,
}

impl AppState {
    /// Wires the services around one live session. Must run inside a Tokio runtime
    /// (the draft writer is spawned here).
    pub fn build(
        model: Arc<dyn CareerModel>,
        store: SessionStore,
        draft: Option<Session>,
        history: Vec<SavedSession>,
        speech: SpeechCapability,
        dictation: DictationCapability,
    ) -> Self {
        let drafts = DraftMirror::spawn(store.clone());
        let controller = Arc::new(SessionController::new(draft, model, drafts));
        let playback = Arc::new(PlaybackController::new(speech));

        Self {
            chat: Arc::new(ChatService::new(controller.clone(), playback)),
            history: Arc::new(HistoryManager::new(store, history, controller.clone())),
            dictation: Arc::new(DictationRegistry::new(dictation)),
            controller,
        }
    }
}
