use serde::{Deserialize, Serialize};

use crate::models::session::Session;

/// An explicitly saved, named snapshot of a session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub id: String,
    pub title: String,
    /// Milliseconds since the Unix epoch; the sort key for listing.
    pub timestamp: i64,
    /// Display date, `M/D/YYYY`.
    pub last_modified: String,
    pub data: Session,
}
