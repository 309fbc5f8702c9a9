use std::sync::Arc;
use std::time::Duration;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vigil_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared HTTP client for outbound liveness probes.
    pub probe_client: reqwest::Client,
}

impl AppState {
    /// Assemble the state from a pool and configuration.
    pub fn new(pool: vigil_db::DbPool, config: ServerConfig) -> Self {
        let probe_client =
            vigil_probe::build_client(Duration::from_secs(config.probe_timeout_secs));
        Self {
            pool,
            config: Arc::new(config),
            probe_client,
        }
    }
}
