//! Axum route handlers for dictation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::speech::dictation::Surface;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StartDictationRequest {
    /// Current chat input. The notes surface always uses the session's notes.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct DictationView {
    pub surface: Surface,
    pub listening: bool,
    /// Merged text for the surface.
    pub text: Option<String>,
}

/// POST /api/v1/dictation/:surface/start
pub async fn handle_start(
    State(state): State<AppState>,
    Path(surface): Path<Surface>,
    request: Option<Json<StartDictationRequest>>,
) -> Result<Json<DictationView>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let (notes, epoch) = state
        .controller
        .read(|live| (live.session.raw_notes.clone(), live.epoch()))
        .await;
    let current = match surface {
        Surface::Notes => notes,
        Surface::Chat => request.text.unwrap_or_default(),
    };
    state.dictation.start(surface, current.clone(), epoch)?;

    Ok(Json(DictationView {
        surface,
        listening: true,
        text: Some(current),
    }))
}

/// POST /api/v1/dictation/:surface/transcript
///
/// `transcript` is cumulative for the whole recognition session. On the notes
/// surface the merged text replaces the session's notes; after a new session or a
/// history load it merges onto the notes of the session now live.
pub async fn handle_transcript(
    State(state): State<AppState>,
    Path(surface): Path<Surface>,
    Json(request): Json<TranscriptRequest>,
) -> Result<Json<DictationView>, AppError> {
    let merged = match surface {
        Surface::Notes => {
            let dictation = &state.dictation;
            state
                .controller
                .mutate(|live| {
                    let merged = dictation.update_for_epoch(
                        surface,
                        &request.transcript,
                        live.epoch(),
                        &live.session.raw_notes,
                    )?;
                    live.session.raw_notes = merged.clone();
                    Ok::<_, AppError>(merged)
                })
                .await?
        }
        Surface::Chat => state.dictation.update(surface, &request.transcript)?,
    };

    Ok(Json(DictationView {
        surface,
        listening: true,
        text: Some(merged),
    }))
}

/// POST /api/v1/dictation/:surface/stop
pub async fn handle_stop(
    State(state): State<AppState>,
    Path(surface): Path<Surface>,
) -> Json<DictationView> {
    state.dictation.stop(surface);
    Json(DictationView {
        surface,
        listening: false,
        text: None,
    })
}
