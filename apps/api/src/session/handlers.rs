//! Axum route handlers for the Session API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{content_for_tab, print_document, ExportFormat};
use crate::models::session::Tab;
use crate::session::controller::SessionView;
use crate::session::machine::InputPatch;
use crate::state::AppState;
use crate::templates::{Template, TEMPLATES};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuery {
    /// Run the flow inline and answer with the settled session.
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Defaults to the active tab.
    pub tab: Option<Tab>,
    #[serde(default)]
    pub format: ExportFormat,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.controller.snapshot().await)
}

/// PATCH /api/v1/session
///
/// Edits inputs. Allowed while a flow is running; the flow keeps the inputs it started with.
pub async fn handle_update_inputs(
    State(state): State<AppState>,
    Json(patch): Json<InputPatch>,
) -> Json<SessionView> {
    Json(state.controller.update_inputs(patch).await)
}

/// POST /api/v1/session/generate
///
/// Starts research + asset generation in the background and returns 202 with the
/// session in its first phase. Poll GET /api/v1/session for the outcome.
/// Empty notes are a no-op and return 200.
///
/// With `?wait=true` the flow runs inside the request: 200 with the settled session,
/// or 502 when asset generation fails (the session still records the error).
pub async fn handle_generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    if query.wait {
        return Ok((StatusCode::OK, Json(state.controller.generate().await?)));
    }
    let Some(ticket) = state.controller.begin_generation().await? else {
        return Ok((StatusCode::OK, Json(state.controller.snapshot().await)));
    };

    let controller = state.controller.clone();
    tokio::spawn(async move {
        // Already recorded on the session.
        let _ = controller.run_generation(ticket).await;
    });

    Ok((StatusCode::ACCEPTED, Json(state.controller.snapshot().await)))
}

/// POST /api/v1/session/new
///
/// Requires `{"confirm": true}`: unsaved work is discarded.
pub async fn handle_new_session(
    State(state): State<AppState>,
    Json(request): Json<NewSessionRequest>,
) -> Result<Json<SessionView>, AppError> {
    if !request.confirm {
        return Err(AppError::Validation(
            "Starting a new session clears unsaved changes; send confirm=true".to_string(),
        ));
    }
    Ok(Json(state.controller.new_session().await))
}

/// POST /api/v1/session/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    request: Option<Json<JobMatchRequest>>,
) -> Result<Json<SessionView>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let view = state.controller.job_match(request.job_description).await?;
    Ok(Json(view))
}

/// GET /api/v1/session/export?tab=COVER_LETTER&format=print
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.controller.snapshot().await.session;
    let tab = query.tab.unwrap_or(session.active_tab);
    let content = content_for_tab(&session, tab);
    if content.is_empty() {
        return Err(AppError::NotFound(format!("Nothing to export for {tab:?}")));
    }

    Ok(match query.format {
        ExportFormat::Markdown => (
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            content,
        ),
        ExportFormat::Print => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            print_document(tab, &content),
        ),
    })
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<&'static [Template]> {
    Json(TEMPLATES.as_slice())
}

/// POST /api/v1/session/template/:key
pub async fn handle_apply_template(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.controller.apply_template(&key).await?))
}
