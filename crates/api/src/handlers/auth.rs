//! Handlers for the `/api/auth` resource (signup, login, logout, me).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vigil_core::error::CoreError;
use vigil_db::models::user::{CreateUser, SafeUser};
use vigil_db::repositories::UserRepo;

use crate::auth::cookies::{self, REFRESH_TOKEN};
use crate::auth::jwt::{hash_refresh_token, verify_token};
use crate::auth::password::{hash_password, validate_password_policy, verify_password};
use crate::auth::resolver::issue_session;
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Minimum username length in characters.
const MIN_USERNAME_LENGTH: usize = 5;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/signup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub avatar: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Register a new account, open a session, and install the cookie pair.
/// Returns 201 Created with the safe user representation.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    // Validate everything before touching the database.
    if input.username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters long"
        ))));
    }
    if !input.email.contains('@') || input.email.starts_with('@') || input.email.ends_with('@') {
        return Err(AppError::Core(CoreError::Validation(
            "Email address is not valid".into(),
        )));
    }
    validate_password_policy(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if input.password != input.confirm_password {
        return Err(AppError::Core(CoreError::Validation(
            "Passwords do not match".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email.to_lowercase(),
        avatar: input.avatar,
        password_hash: hashed,
    };

    let user = match UserRepo::create(&state.pool, &create_dto).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e, "uq_users_email") => {
            return Err(AppError::Core(CoreError::Conflict(
                "An account with this email already exists".into(),
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let tokens = issue_session(&state.pool, &state.config.jwt, user.id).await?;

    Ok((
        StatusCode::CREATED,
        cookies::set_auth_cookies(&tokens.access_token, &tokens.refresh_token),
        Json(SafeUser::from(user)),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password, open a session, and install the
/// cookie pair.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // The same message covers an unknown email and a wrong password so
    // the response does not reveal which emails are registered.
    let unauthorized =
        || AppError::Core(CoreError::Unauthorized("Wrong email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(unauthorized)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(unauthorized());
    }

    let tokens = issue_session(&state.pool, &state.config.jwt, user.id).await?;

    Ok((
        cookies::set_auth_cookies(&tokens.access_token, &tokens.refresh_token),
        Json(SafeUser::from(user)),
    ))
}

/// POST /api/auth/logout
///
/// Revoke the presented session and clear both cookies. Always answers
/// 204, even when no valid session was presented -- logging out twice
/// is not an error.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(token) = cookies::read(&headers, REFRESH_TOKEN) {
        if let Some(user_id) = verify_token(&token, &state.config.jwt) {
            let hash = hash_refresh_token(&token);
            if let Err(e) = vigil_db::repositories::SessionRepo::revoke(
                &state.pool,
                user_id,
                &hash,
            )
            .await
            {
                // Best effort: the cookies get cleared regardless.
                tracing::warn!(user_id, error = %e, "Failed to revoke session on logout");
            }
        }
    }

    Ok((StatusCode::NO_CONTENT, cookies::clear_auth_cookies()))
}

/// GET /api/auth/me
///
/// Return the authenticated user behind the access token.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<SafeUser> {
    Json(user)
}
