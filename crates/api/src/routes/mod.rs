pub mod auth;
pub mod dashboard;
pub mod health;
pub mod monitor;
pub mod pages;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 register (public)
/// /auth/login                  login (public)
/// /auth/logout                 logout
/// /auth/me                     current user (requires auth)
///
/// /projects                    list, create
/// /projects/{id}               get, update, delete
/// /projects/{id}/history       project with observations
/// /projects/{id}/enabled       toggle monitoring (PATCH)
/// /projects/{id}/refresh       probe on demand (POST)
///
/// /dashboard                   grouped projects with history
///
/// /monitor/refresh             sweep all enabled projects (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/dashboard", dashboard::router())
        .nest("/monitor", monitor::router())
}
