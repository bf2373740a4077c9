use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::session::controller::SessionView;
use crate::speech::playback::PlaybackView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/v1/chat
///
/// Waits for the coach's reply; transport failures come back as an apology
/// message in the transcript, not as an error.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.chat.send(&request.message).await?))
}

/// POST /api/v1/chat/messages/:index/speech
pub async fn handle_toggle_speech(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PlaybackView>, AppError> {
    Ok(Json(state.chat.toggle_speech(index).await?))
}
