//! Edge gatekeeper: routes page navigation based on cookie state.
//!
//! Runs on every request before the router's handlers. API routes pass
//! through untouched so they can answer with proper status codes; page
//! routes are steered between `/login`, `/auth/refresh`, and their
//! destination depending on which credential cookies are present and
//! valid. The gatekeeper never touches the database -- it inspects
//! token signatures only, and leaves user lookups to the handlers.

use axum::extract::{Request, State};
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};

use crate::auth::cookies::{
    self, ACCESS_TOKEN, ORIGINAL_URL, ORIGINAL_URL_MAX_AGE_SECS, REFRESH_TOKEN,
};
use crate::auth::jwt::verify_token;
use crate::state::AppState;

/// Prefixes the gatekeeper never intercepts.
const BYPASS_PREFIXES: &[&str] = &["/api", "/health", "/auth/refresh"];

/// Page prefixes reachable without credentials.
const PUBLIC_PAGE_PREFIXES: &[&str] = &["/login", "/signup"];

fn has_prefix(path: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| {
        path == *p || path.starts_with(&format!("{p}/"))
    })
}

/// Decide, per request, whether to pass through, redirect, or repair
/// the credential cookies.
pub async fn gatekeeper(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if has_prefix(&path, BYPASS_PREFIXES) {
        return next.run(request).await;
    }

    let is_public = has_prefix(&path, PUBLIC_PAGE_PREFIXES);
    let jwt = &state.config.jwt;

    let refresh_valid = cookies::read(request.headers(), REFRESH_TOKEN)
        .map(|t| verify_token(&t, jwt).is_some());
    let access_valid = cookies::read(request.headers(), ACCESS_TOKEN)
        .map(|t| verify_token(&t, jwt).is_some())
        .unwrap_or(false);

    match refresh_valid {
        // No refresh cookie at all: anonymous visitor.
        None => {
            if is_public {
                next.run(request).await
            } else {
                Redirect::to("/login").into_response()
            }
        }
        // A refresh cookie that does not verify is garbage. Clear both
        // cookies so the next request starts clean.
        Some(false) => {
            (cookies::clear_auth_cookies(), Redirect::to("/login")).into_response()
        }
        Some(true) => {
            if !access_valid {
                // Session is alive but the access token lapsed. Stash
                // the destination and detour through the refresh page.
                let destination = request
                    .uri()
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| "/dashboard".to_string());
                let stash = AppendHeaders([(
                    SET_COOKIE,
                    cookies::build(ORIGINAL_URL, &destination, ORIGINAL_URL_MAX_AGE_SECS),
                )]);
                return (stash, Redirect::to("/auth/refresh")).into_response();
            }
            // Fully authenticated visitors have no business on the
            // login or signup pages.
            if is_public {
                return Redirect::to("/dashboard").into_response();
            }
            next.run(request).await
        }
    }
}
