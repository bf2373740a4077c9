// Chat Subsystem: append-only transcript over the live session, with the
// generated kit (or the raw notes) as context for every turn.

pub mod handlers;

use std::sync::Arc;

use tracing::warn;

use crate::errors::AppError;
use crate::generation::ModelError;
use crate::models::session::{ChatMessage, Role, Session};
use crate::session::controller::{SessionController, SessionView};
use crate::session::machine::LiveSession;
use crate::speech::pcm::decode_pcm;
use crate::speech::playback::{PlaybackController, PlaybackView, Toggle};

/// Appended instead of a reply when the model call fails.
pub const TRANSPORT_FALLBACK: &str =
    "Sorry, I encountered an error while thinking. Please try again.";

/// Context for a chat turn: the generated kit when there is one, else the notes.
pub fn chat_context(session: &Session) -> String {
    match &session.assets {
        Some(assets) => format!(
            "Resume:\n{}\n\nCover Letter:\n{}\n\nInterview Q&A:\n{}\n\nMissing Skills:\n{}",
            assets.resume_draft,
            assets.cover_letter,
            assets.interview_prep,
            assets.skill_gap_analysis
        ),
        None => format!("Student has provided these notes: {}", session.raw_notes),
    }
}

struct ChatTurn {
    epoch: u64,
    /// Transcript before the new user message.
    history: Vec<ChatMessage>,
    message: String,
    context: String,
}

fn begin_turn(live: &mut LiveSession, message: &str) -> Result<ChatTurn, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }
    if live.chat_thinking {
        return Err(AppError::Conflict(
            "The coach is still answering the previous message".to_string(),
        ));
    }

    let turn = ChatTurn {
        epoch: live.epoch(),
        history: live.session.chat_messages.clone(),
        message: message.to_string(),
        context: chat_context(&live.session),
    };
    live.session.chat_messages.push(ChatMessage::user(message));
    live.chat_thinking = true;
    Ok(turn)
}

fn finish_turn(live: &mut LiveSession, turn: &ChatTurn, reply: String) {
    if !live.is_current(turn.epoch) {
        warn!("Dropping chat reply from stale epoch {}", turn.epoch);
        return;
    }
    live.session.chat_messages.push(ChatMessage::model(reply));
    live.chat_thinking = false;
}

pub struct ChatService {
    controller: Arc<SessionController>,
    playback: Arc<PlaybackController>,
}

impl ChatService {
    pub fn new(controller: Arc<SessionController>, playback: Arc<PlaybackController>) -> Self {
        Self {
            controller,
            playback,
        }
    }

    /// Appends the user message, asks the model, appends the reply (or the fallback).
    pub async fn send(&self, message: &str) -> Result<SessionView, AppError> {
        let turn = self
            .controller
            .mutate(|live| begin_turn(live, message))
            .await?;

        let reply = match self
            .controller
            .model()
            .send_chat_message(&turn.history, &turn.message, Some(&turn.context))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat turn failed: {e}");
                TRANSPORT_FALLBACK.to_string()
            }
        };

        self.controller
            .mutate(|live| finish_turn(live, &turn, reply))
            .await;
        Ok(self.controller.snapshot().await)
    }

    /// Plays or stops the spoken version of a coach message.
    pub async fn toggle_speech(&self, index: usize) -> Result<PlaybackView, AppError> {
        let (message, epoch) = self
            .controller
            .read(|live| (live.session.chat_messages.get(index).cloned(), live.epoch()))
            .await;
        let message =
            message.ok_or_else(|| AppError::NotFound(format!("Chat message {index} not found")))?;
        if message.role != Role::Model {
            return Err(AppError::Validation(
                "Only coach messages can be played".to_string(),
            ));
        }

        let ticket = match self.playback.toggle(index, epoch)? {
            Toggle::Stopped => return Ok(self.playback.view(None)),
            Toggle::Start(ticket) => ticket,
        };

        let payload = self
            .controller
            .model()
            .synthesize_speech(&message.content)
            .await
            .map_err(AppError::Speech)?;
        let audio =
            decode_pcm(&payload).map_err(|e| AppError::Speech(ModelError::Parse(e.to_string())))?;

        if !self.controller.read(|live| live.is_current(epoch)).await {
            warn!("Dropping speech for message {index} from stale epoch {epoch}");
            return Ok(self.playback.view(None));
        }
        let clip = self.playback.start(ticket, &audio);
        Ok(self.playback.view(clip))
    }
}
