//! Handler for the `/api/dashboard` aggregation endpoint.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use vigil_core::category::ProjectCategory;
use vigil_db::models::project::ProjectWithHistory;
use vigil_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/dashboard
///
/// Everything the dashboard renders in one request: the caller's
/// projects grouped by category, each with its history newest first.
/// Categories without projects are simply absent from the map.
pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<DataResponse<HashMap<ProjectCategory, Vec<ProjectWithHistory>>>>> {
    let grouped = ProjectRepo::list_with_history_by_category(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: grouped }))
}
