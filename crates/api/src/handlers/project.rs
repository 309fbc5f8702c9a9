//! Handlers for the `/api/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vigil_core::error::CoreError;
use vigil_core::probe::ProbeOutcome;
use vigil_core::types::DbId;
use vigil_db::models::project::{CreateProject, Project, ProjectWithHistory, UpdateProject};
use vigil_db::repositories::{HistoryRepo, ProjectRepo};
use vigil_probe::probe_project;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Probe a project once and append the observation to its history.
async fn probe_and_record(state: &AppState, project: &Project) -> AppResult<ProbeOutcome> {
    let outcome = probe_project(&state.probe_client, project).await;
    HistoryRepo::record(&state.pool, outcome.project_id, outcome.status).await?;
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
///
/// List the caller's projects, name ascending.
pub async fn list_projects(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_for_owner(&state.pool, user.id).await?;
    Ok(Json(projects))
}

/// POST /api/projects
///
/// Create a project. When it is born enabled, probe it immediately so
/// it has a first observation before the dashboard ever renders it.
pub async fn create_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name must not be empty".into(),
        )));
    }

    let project = ProjectRepo::create(&state.pool, user.id, &input).await?;

    if project.enabled {
        probe_and_record(&state, &project).await?;
    }

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_for_owner(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;
    Ok(Json(project))
}

/// GET /api/projects/{id}/history
///
/// The project with its observations, newest first.
pub async fn get_project_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectWithHistory>> {
    let project = ProjectRepo::find_with_history(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
///
/// Partial update; omitted fields keep their value. An update that
/// leaves the project enabled re-probes it, since the target URLs may
/// have changed.
pub async fn update_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::update(&state.pool, user.id, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;

    if project.enabled {
        probe_and_record(&state, &project).await?;
    }

    Ok(Json(project))
}

/// Request body for `PATCH /api/projects/{id}/enabled`.
#[derive(Debug, serde::Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

/// PATCH /api/projects/{id}/enabled
///
/// Flip monitoring on or off without probing.
pub async fn set_project_enabled(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetEnabledRequest>,
) -> AppResult<StatusCode> {
    let updated = ProjectRepo::set_enabled(&state.pool, user.id, id, input.enabled).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/projects/{id}/refresh
///
/// Probe one project on demand, record the observation, and return it.
pub async fn refresh_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProbeOutcome>> {
    let project = ProjectRepo::find_for_owner(&state.pool, user.id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            })
        })?;

    let outcome = probe_and_record(&state, &project).await?;
    Ok(Json(outcome))
}

/// DELETE /api/projects/{id}
///
/// Remove a project together with its history.
pub async fn delete_project(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete_with_history(&state.pool, user.id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
