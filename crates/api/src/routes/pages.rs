//! Root-level page routes (outside `/api`).

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at root level.
///
/// ```text
/// GET /auth/refresh  -> redeem the refresh cookie, bounce back
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/refresh", get(pages::refresh_page))
}
