pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{chat, history, session, speech};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route(
            "/api/v1/session",
            get(session::handlers::handle_get_session)
                .patch(session::handlers::handle_update_inputs),
        )
        .route(
            "/api/v1/session/generate",
            post(session::handlers::handle_generate),
        )
        .route(
            "/api/v1/session/new",
            post(session::handlers::handle_new_session),
        )
        .route(
            "/api/v1/session/job-match",
            post(session::handlers::handle_job_match),
        )
        .route(
            "/api/v1/session/export",
            get(session::handlers::handle_export),
        )
        .route(
            "/api/v1/session/template/:key",
            post(session::handlers::handle_apply_template),
        )
        .route(
            "/api/v1/templates",
            get(session::handlers::handle_list_templates),
        )
        // Chat
        .route("/api/v1/chat", post(chat::handlers::handle_send_message))
        .route(
            "/api/v1/chat/messages/:index/speech",
            post(chat::handlers::handle_toggle_speech),
        )
        // Dictation
        .route(
            "/api/v1/dictation/:surface/start",
            post(speech::handlers::handle_start),
        )
        .route(
            "/api/v1/dictation/:surface/transcript",
            post(speech::handlers::handle_transcript),
        )
        .route(
            "/api/v1/dictation/:surface/stop",
            post(speech::handlers::handle_stop),
        )
        // History
        .route(
            "/api/v1/history",
            get(history::handlers::handle_list).post(history::handlers::handle_save),
        )
        .route(
            "/api/v1/history/:id/load",
            post(history::handlers::handle_load),
        )
        .route(
            "/api/v1/history/:id",
            axum::routing::delete(history::handlers::handle_delete),
        )
        .with_state(state)
}
