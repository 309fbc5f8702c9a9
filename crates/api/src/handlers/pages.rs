//! Handler for the `/auth/refresh` navigation detour.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse, Redirect};

use crate::auth::cookies::{self, ACCESS_TOKEN, ORIGINAL_URL, REFRESH_TOKEN};
use crate::auth::resolver::resolve_with_refresh;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /auth/refresh
///
/// Redeem the refresh cookie for a fresh token pair and bounce the
/// visitor back to where they were headed (stashed in the
/// `original_url` cookie by the gatekeeper). A failed redemption clears
/// the cookies and lands on `/login` instead.
pub async fn refresh_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let destination =
        cookies::read(&headers, ORIGINAL_URL).unwrap_or_else(|| "/dashboard".to_string());
    let refresh_token = cookies::read(&headers, REFRESH_TOKEN);

    // The access token is deliberately ignored here: a visitor only
    // lands on this page because it was missing or stale.
    let resolved = resolve_with_refresh(
        &state.pool,
        &state.config.jwt,
        None,
        refresh_token.as_deref(),
    )
    .await?;

    match resolved {
        Some((_user, Some(tokens))) => Ok((
            AppendHeaders([
                (
                    SET_COOKIE,
                    cookies::build(ACCESS_TOKEN, &tokens.access_token, cookies::ACCESS_MAX_AGE_SECS),
                ),
                (
                    SET_COOKIE,
                    cookies::build(
                        REFRESH_TOKEN,
                        &tokens.refresh_token,
                        cookies::REFRESH_MAX_AGE_SECS,
                    ),
                ),
                (SET_COOKIE, cookies::clear(ORIGINAL_URL)),
            ]),
            Redirect::to(&destination),
        )
            .into_response()),
        // Redeemed without rotation cannot happen here (no access token
        // was offered), so anything else means the session is dead.
        _ => Ok((
            AppendHeaders([
                (SET_COOKIE, cookies::clear(ACCESS_TOKEN)),
                (SET_COOKIE, cookies::clear(REFRESH_TOKEN)),
                (SET_COOKIE, cookies::clear(ORIGINAL_URL)),
            ]),
            Redirect::to("/login"),
        )
            .into_response()),
    }
}
