//! Handler for the `/api/monitor/refresh` sweep endpoint.
//!
//! One call probes every enabled project the owner has, across all
//! three categories concurrently. External schedulers (a cron ping)
//! authenticate by passing `ownerId` explicitly; browsers authenticate
//! by cookie, and a stale access cookie is transparently refreshed as
//! part of the call.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vigil_core::category::ProjectCategory;
use vigil_core::error::CoreError;
use vigil_core::probe::ProbeOutcome;
use vigil_core::types::DbId;
use vigil_db::repositories::ProjectRepo;
use vigil_probe::probe_all;

use crate::auth::cookies::{self, ACCESS_TOKEN, REFRESH_TOKEN};
use crate::auth::resolver::{resolve_with_refresh, IssuedTokens};
use crate::error::{AppError, AppResult};
use crate::recorder;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `POST /api/monitor/refresh`.
#[derive(Debug, Deserialize)]
pub struct MonitorQuery {
    /// Acts on behalf of this owner without cookies (scheduler mode).
    #[serde(rename = "ownerId")]
    pub owner_id: Option<DbId>,
}

/// POST /api/monitor/refresh
///
/// Probe all of an owner's enabled projects and answer with the
/// database-category outcomes (the slowest to observe elsewhere, and
/// what the original caller polls for). The full batch is persisted to
/// history in the background.
pub async fn refresh_all(
    State(state): State<AppState>,
    Query(query): Query<MonitorQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    // Resolve who we are sweeping for.
    let (owner_id, new_tokens): (DbId, Option<IssuedTokens>) = match query.owner_id {
        Some(owner_id) => (owner_id, None),
        None => {
            let access = cookies::read(&headers, ACCESS_TOKEN);
            let refresh = cookies::read(&headers, REFRESH_TOKEN);
            let resolved = resolve_with_refresh(
                &state.pool,
                &state.config.jwt,
                access.as_deref(),
                refresh.as_deref(),
            )
            .await?;
            let Some((user, tokens)) = resolved else {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Not logged in and no ownerId provided".into(),
                )));
            };
            (user.id, tokens)
        }
    };

    // Fan out over all three categories at once; within a category the
    // probe engine already runs its batch concurrently.
    let (frontends, apis, databases) = tokio::try_join!(
        ProjectRepo::list_enabled_by_category(&state.pool, owner_id, ProjectCategory::Frontend),
        ProjectRepo::list_enabled_by_category(&state.pool, owner_id, ProjectCategory::Api),
        ProjectRepo::list_enabled_by_category(&state.pool, owner_id, ProjectCategory::Database),
    )?;

    let (frontend_outcomes, api_outcomes, database_outcomes) = tokio::join!(
        probe_all(&state.probe_client, &frontends),
        probe_all(&state.probe_client, &apis),
        probe_all(&state.probe_client, &databases),
    );

    // Persist the whole sweep off the request path.
    let mut all_outcomes: Vec<ProbeOutcome> =
        Vec::with_capacity(frontend_outcomes.len() + api_outcomes.len() + database_outcomes.len());
    all_outcomes.extend(frontend_outcomes);
    all_outcomes.extend(api_outcomes);
    all_outcomes.extend(database_outcomes.clone());
    tokio::spawn(recorder::record_outcomes(state.pool.clone(), all_outcomes));

    let body = Json(DataResponse {
        data: database_outcomes,
    });

    // A refresh taken on the way in installs the rotated cookie pair.
    match new_tokens {
        Some(tokens) => Ok((
            cookies::set_auth_cookies(&tokens.access_token, &tokens.refresh_token),
            body,
        )
            .into_response()),
        None => Ok(body.into_response()),
    }
}
