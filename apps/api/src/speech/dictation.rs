//! Speech-to-text sessions, one per input surface.
//!
//! Recognition runs in the browser; this side keeps the text captured when
//! dictation started and merges each cumulative transcript onto it. Captures are
//! tagged with the session epoch so a reset never lets old notes come back.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    Notes,
    Chat,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Notes => write!(f, "notes"),
            Surface::Chat => write!(f, "chat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictationCapability {
    Available,
    Unavailable,
}

/// `prefix` + separator + `transcript`.
///
/// Notes get a space only when the prefix doesn't already end in whitespace
/// and there is something to append; chat only checks for a trailing space.
pub fn merge_transcript(surface: Surface, prefix: &str, transcript: &str) -> String {
    let needs_space = match surface {
        Surface::Notes => {
            !prefix.is_empty()
                && !prefix.ends_with(' ')
                && !prefix.ends_with('\n')
                && !transcript.is_empty()
        }
        Surface::Chat => !prefix.is_empty() && !prefix.ends_with(' '),
    };
    let separator = if needs_space { " " } else { "" };
    format!("{prefix}{separator}{transcript}")
}

#[derive(Debug)]
struct Capture {
    prefix: String,
    epoch: u64,
}

pub struct DictationRegistry {
    capability: DictationCapability,
    /// Text captured at start, per listening surface.
    sessions: Mutex<HashMap<Surface, Capture>>,
}

impl DictationRegistry {
    pub fn new(capability: DictationCapability) -> Self {
        Self {
            capability,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        match self.capability {
            DictationCapability::Available => Ok(()),
            DictationCapability::Unavailable => Err(AppError::Unavailable(
                "Speech recognition is not available".to_string(),
            )),
        }
    }

    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<Surface, Capture>> {
        self.sessions.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn is_listening(&self, surface: Surface) -> bool {
        self.sessions().contains_key(&surface)
    }

    /// Opens the surface's recognition session, capturing its current text as of `epoch`.
    pub fn start(
        &self,
        surface: Surface,
        current_text: String,
        epoch: u64,
    ) -> Result<(), AppError> {
        self.ensure_available()?;
        let mut sessions = self.sessions();
        if sessions.contains_key(&surface) {
            return Err(AppError::Conflict(format!(
                "Dictation is already active on {surface}"
            )));
        }
        sessions.insert(
            surface,
            Capture {
                prefix: current_text,
                epoch,
            },
        );
        debug!("Dictation started on {surface}");
        Ok(())
    }

    /// Merged text for the latest cumulative transcript.
    pub fn update(&self, surface: Surface, transcript: &str) -> Result<String, AppError> {
        self.ensure_available()?;
        let sessions = self.sessions();
        let capture = sessions
            .get(&surface)
            .ok_or_else(|| inactive(surface))?;
        Ok(merge_transcript(surface, &capture.prefix, transcript))
    }

    /// Like [`update`](Self::update), for text owned by the live session. A capture taken
    /// before the session moved to `epoch` is re-taken from `current_text` first.
    pub fn update_for_epoch(
        &self,
        surface: Surface,
        transcript: &str,
        epoch: u64,
        current_text: &str,
    ) -> Result<String, AppError> {
        self.ensure_available()?;
        let mut sessions = self.sessions();
        let capture = sessions
            .get_mut(&surface)
            .ok_or_else(|| inactive(surface))?;
        if capture.epoch != epoch {
            warn!(
                "Dictation on {surface} started in epoch {}, re-capturing for epoch {epoch}",
                capture.epoch
            );
            capture.prefix = current_text.to_string();
            capture.epoch = epoch;
        }
        Ok(merge_transcript(surface, &capture.prefix, transcript))
    }

    /// Closes the session. Stopping an idle surface is a no-op.
    pub fn stop(&self, surface: Surface) -> bool {
        let was_listening = self.sessions().remove(&surface).is_some();
        if was_listening {
            debug!("Dictation stopped on {surface}");
        }
        was_listening
    }
}

fn inactive(surface: Surface) -> AppError {
    AppError::Validation(format!("Dictation is not active on {surface}"))
}
