// Persistent Store: two fixed keys, the in-progress draft and the saved history.
// Backends are interchangeable behind `KeyValueStore`; `SessionStore` adds the
// typed JSON layer and the "corrupt means absent" read policy.

pub mod draft;
pub mod file;
#[cfg(test)]
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::history::SavedSession;
use crate::models::session::Session;

pub const DRAFT_KEY: &str = "career_launch_current_session";
pub const HISTORY_KEY: &str = "career_launch_history_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Raw string storage. Each `save` replaces the whole value or nothing.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn save(&self, key: &str, json: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed access to the draft and history keys.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The stored draft, or `None` when absent, unreadable or corrupt.
    pub async fn load_draft(&self) -> Option<Session> {
        self.load_json(DRAFT_KEY).await
    }

    /// The stored history in storage order. Unreadable or corrupt data yields an empty list.
    pub async fn load_history(&self) -> Vec<SavedSession> {
        self.load_json(HISTORY_KEY).await.unwrap_or_default()
    }

    pub async fn save_draft(&self, session: &Session) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)?;
        self.kv.save(DRAFT_KEY, &json).await
    }

    pub async fn clear_draft(&self) -> Result<(), StoreError> {
        self.kv.remove(DRAFT_KEY).await
    }

    pub async fn save_history(&self, records: &[SavedSession]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.kv.save(HISTORY_KEY, &json).await
    }

    async fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.load(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored value for {key}");
                return None;
            }
            Err(e) => {
                error!("Failed to read {key}, starting empty: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Stored value for {key} is corrupt, ignoring it: {e}");
                None
            }
        }
    }
}
