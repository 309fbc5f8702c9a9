//! Background persistence of probe outcomes.

use vigil_core::probe::ProbeOutcome;
use vigil_db::repositories::HistoryRepo;
use vigil_db::DbPool;

/// Append a batch of observations to history, settling every entry.
///
/// One failed insert never blocks the rest of the batch; failures are
/// logged and counted. Returns the number of entries recorded.
///
/// Runs detached (via `tokio::spawn`) from the monitor endpoint, so the
/// response never waits on history writes.
pub async fn record_outcomes(pool: DbPool, outcomes: Vec<ProbeOutcome>) -> usize {
    let mut recorded = 0;
    for outcome in &outcomes {
        match HistoryRepo::record(&pool, outcome.project_id, outcome.status).await {
            Ok(_) => recorded += 1,
            Err(e) => {
                tracing::error!(
                    project_id = outcome.project_id,
                    name = %outcome.name,
                    error = %e,
                    "Failed to record probe outcome"
                );
            }
        }
    }
    if recorded < outcomes.len() {
        tracing::warn!(
            recorded,
            total = outcomes.len(),
            "Recorded only part of a probe batch"
        );
    }
    recorded
}
