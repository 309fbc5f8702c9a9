//! Route definitions for the `/monitor` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::monitor;
use crate::state::AppState;

/// Routes mounted at `/api/monitor`.
///
/// ```text
/// POST /refresh  -> sweep all enabled projects (cookie or ownerId auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/refresh", post(monitor::refresh_all))
}
