//! Probe history model.

use serde::Serialize;
use sqlx::FromRow;
use vigil_core::types::{DbId, Timestamp};

/// One observation row from the append-only `history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub project_id: DbId,
    /// `"Active"` or `"Inactive"`.
    pub status: String,
    pub checked_at: Timestamp,
}
