//! Repository for the append-only `history` table.

use sqlx::PgPool;
use vigil_core::probe::ProbeStatus;
use vigil_core::types::DbId;

use crate::models::history::HistoryEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, status, checked_at";

/// Appends and reads probe observations. Rows are never updated.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Append one observation for a project, timestamped now.
    pub async fn record(
        pool: &PgPool,
        project_id: DbId,
        status: ProbeStatus,
    ) -> Result<HistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO history (project_id, status)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(project_id)
            .bind(status.as_str())
            .fetch_one(pool)
            .await
    }

    /// List a project's observations, newest first.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history WHERE project_id = $1 ORDER BY checked_at DESC"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
