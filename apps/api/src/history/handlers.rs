use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::history::SavedSession;
use crate::session::controller::SessionView;
use crate::state::AppState;

/// GET /api/v1/history
pub async fn handle_list(State(state): State<AppState>) -> Json<Vec<SavedSession>> {
    Json(state.history.list().await)
}

/// POST /api/v1/history
pub async fn handle_save(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SavedSession>), AppError> {
    let record = state.history.save().await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// POST /api/v1/history/:id/load
pub async fn handle_load(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.history.load(&id).await?))
}

/// DELETE /api/v1/history/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.history.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
