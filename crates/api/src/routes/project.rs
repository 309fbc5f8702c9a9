//! Route definitions for the `/projects` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/api/projects` (all require auth).
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (probes if enabled)
/// GET    /{id}            -> get one
/// PUT    /{id}            -> partial update (re-probes if enabled)
/// DELETE /{id}            -> delete with history
/// GET    /{id}/history    -> project with observations
/// PATCH  /{id}/enabled    -> toggle monitoring
/// POST   /{id}/refresh    -> probe on demand
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list_projects).post(project::create_project))
        .route(
            "/{id}",
            get(project::get_project)
                .put(project::update_project)
                .delete(project::delete_project),
        )
        .route("/{id}/history", get(project::get_project_history))
        .route("/{id}/enabled", patch(project::set_project_enabled))
        .route("/{id}/refresh", post(project::refresh_project))
}
