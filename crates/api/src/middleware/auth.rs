//! Cookie-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vigil_core::error::CoreError;
use vigil_db::models::user::SafeUser;
use vigil_db::repositories::UserRepo;

use crate::auth::cookies::{self, ACCESS_TOKEN};
use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `access_token` cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(CurrentUser(user): CurrentUser) -> AppResult<Json<SafeUser>> {
///     Ok(Json(user))
/// }
/// ```
///
/// Rejects with `401 Unauthorized` when the cookie is missing, the
/// token is invalid or expired, or the user no longer exists.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SafeUser);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = cookies::read(&parts.headers, ACCESS_TOKEN).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing access token".into()))
        })?;

        let user_id = verify_token(&token, &state.config.jwt).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
            })?;

        Ok(CurrentUser(user.into()))
    }
}
