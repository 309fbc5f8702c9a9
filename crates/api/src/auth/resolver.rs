//! Identity resolution: turn cookie tokens into an authenticated user.
//!
//! Resolution tries the access token first and only falls back to the
//! refresh token when the access token is absent or stale. A successful
//! refresh rotates the session: the presented refresh token is swapped
//! for a fresh one in a single conditional update, and a rotation that
//! matches no row is treated as token reuse -- every session the user
//! holds is revoked and the request is answered as unauthenticated.

use vigil_core::types::{DbId, Timestamp};
use vigil_db::models::user::SafeUser;
use vigil_db::repositories::{SessionRepo, UserRepo};
use vigil_db::DbPool;

use crate::auth::jwt::{self, JwtConfig, TokenKind};
use crate::error::{AppError, AppResult};

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Wall-clock moment at which a refresh token minted now will expire.
fn refresh_expiry(config: &JwtConfig) -> Timestamp {
    chrono::Utc::now() + chrono::Duration::seconds(config.expiry_secs(TokenKind::Refresh))
}

/// Mint a token pair for a user and register the refresh grant.
pub async fn issue_session(
    pool: &DbPool,
    config: &JwtConfig,
    user_id: DbId,
) -> AppResult<IssuedTokens> {
    let access_token = jwt::issue_token(TokenKind::Access, user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let refresh_token = jwt::issue_token(TokenKind::Refresh, user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    SessionRepo::create(
        pool,
        user_id,
        &jwt::hash_refresh_token(&refresh_token),
        refresh_expiry(config),
    )
    .await?;

    Ok(IssuedTokens {
        access_token,
        refresh_token,
    })
}

/// Resolve a user from cookie tokens, rotating the session if the
/// refresh path was taken.
///
/// Returns:
/// - `Ok(Some((user, None)))` when the access token alone sufficed.
/// - `Ok(Some((user, Some(tokens))))` when the refresh token was
///   redeemed; the caller must install the new cookie pair.
/// - `Ok(None)` when neither token yields a user.
pub async fn resolve_with_refresh(
    pool: &DbPool,
    config: &JwtConfig,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> AppResult<Option<(SafeUser, Option<IssuedTokens>)>> {
    // Fast path: a valid access token needs no session lookup.
    if let Some(token) = access_token {
        if let Some(user_id) = jwt::verify_token(token, config) {
            if let Some(user) = UserRepo::find_by_id(pool, user_id).await? {
                return Ok(Some((user.into(), None)));
            }
        }
    }

    let Some(token) = refresh_token else {
        return Ok(None);
    };
    let Some(user_id) = jwt::verify_token(token, config) else {
        return Ok(None);
    };

    let old_hash = jwt::hash_refresh_token(token);
    let Some(session) = SessionRepo::find_by_token_hash(pool, &old_hash).await? else {
        return Ok(None);
    };
    // The hash matched a session but the token's claim disagrees with
    // the session owner. Never honor it.
    if session.user_id != user_id {
        tracing::warn!(
            claimed = user_id,
            session_owner = session.user_id,
            "Refresh token claim does not match session owner"
        );
        return Ok(None);
    }
    let Some(user) = UserRepo::find_by_id(pool, user_id).await? else {
        return Ok(None);
    };

    let access_token = jwt::issue_token(TokenKind::Access, user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let new_refresh = jwt::issue_token(TokenKind::Refresh, user_id, config)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    let rotated = SessionRepo::rotate(
        pool,
        user_id,
        &old_hash,
        &jwt::hash_refresh_token(&new_refresh),
        refresh_expiry(config),
    )
    .await?;

    if !rotated {
        // A concurrent request already consumed this refresh token.
        // Treat it as reuse and force a logout on every device.
        let revoked = SessionRepo::revoke_all_for_user(pool, user_id).await?;
        tracing::warn!(
            user_id,
            revoked_sessions = revoked,
            "Refresh token reuse detected, all sessions revoked"
        );
        return Ok(None);
    }

    Ok(Some((
        user.into(),
        Some(IssuedTokens {
            access_token,
            refresh_token: new_refresh,
        }),
    )))
}
