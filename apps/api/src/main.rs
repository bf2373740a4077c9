mod chat;
mod config;
mod errors;
mod export;
mod generation;
mod history;
mod llm_client;
mod models;
mod routes;
mod session;
mod speech;
mod state;
mod store;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::generation::{GeminiModel, REASONING_MODEL};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::speech::dictation::DictationCapability;
use crate::speech::playback::{ClientRelay, SpeechCapability};
use crate::state::AppState;
use crate::store::file::FileStore;
use crate::store::redis::RedisStore;
use crate::store::{KeyValueStore, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerLaunch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize storage
    let kv: Arc<dyn KeyValueStore> = match &config.store {
        StoreBackend::File { data_dir } => {
            info!("File store at {}", data_dir.display());
            Arc::new(FileStore::new(data_dir.clone()))
        }
        StoreBackend::Redis { url } => {
            let store = RedisStore::connect(url)
                .await
                .context("Failed to connect to Redis")?;
            info!("Redis store connected");
            Arc::new(store)
        }
    };
    let store = SessionStore::new(kv);

    // Restore the draft and history; unreadable data starts empty
    let draft = store.load_draft().await;
    let history = store.load_history().await;
    info!(
        "Loaded draft: {}, saved sessions: {}",
        draft.is_some(),
        history.len()
    );

    // Initialize model client
    let llm = GeminiClient::with_api_base(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
    );
    info!("Gemini client initialized (reasoning model: {REASONING_MODEL})");

    let speech = if config.speech_playback {
        SpeechCapability::Available(Arc::new(ClientRelay::new()))
    } else {
        SpeechCapability::Unavailable
    };
    let dictation = if config.dictation {
        DictationCapability::Available
    } else {
        DictationCapability::Unavailable
    };

    // Build app state
    let state = AppState::build(
        Arc::new(GeminiModel::new(llm)),
        store,
        draft,
        history,
        speech,
        dictation,
    );
    let controller = state.controller.clone();

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the browser UI is served from another origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Last draft writes must land before exit
    controller.flush_drafts().await;
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received SIGINT");
}
