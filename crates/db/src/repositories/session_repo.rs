//! Repository for the `sessions` table.
//!
//! Sessions are the durable registry of valid refresh tokens. Tokens
//! are stored as SHA-256 hashes; every method here takes hashes, never
//! plaintext tokens.

use sqlx::PgPool;
use vigil_core::types::{DbId, Timestamp};

use crate::models::session::Session;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, created_at";

/// Provides CRUD operations for refresh-token sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Register a new refresh-token grant for a user.
    ///
    /// `expires_at` mirrors the token's `exp` claim. Expired leftovers
    /// are swept here so the table never outgrows the set of live
    /// grants by more than one lookup interval.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        Self::purge_expired(pool).await?;

        let query = format!(
            "INSERT INTO sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live session by its refresh-token hash.
    ///
    /// Expired rows are deleted on sight and never returned, so a
    /// token past its `exp` cannot resolve even if clock skew let it
    /// through signature validation.
    pub async fn find_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Session>, sqlx::Error> {
        Self::purge_expired(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM sessions
             WHERE refresh_token_hash = $1 AND expires_at > now()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Rotate a session: swap `old_hash` for `new_hash` on the row
    /// matching `(user_id, old_hash)` exactly, extending the expiry to
    /// match the replacement token.
    ///
    /// Returns `false` when no row matched, which means the presented
    /// token was already rotated away or revoked -- callers treat that
    /// as token reuse, not as success.
    pub async fn rotate(
        pool: &PgPool,
        user_id: DbId,
        old_hash: &str,
        new_hash: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET refresh_token_hash = $3, expires_at = $4
             WHERE user_id = $1 AND refresh_token_hash = $2",
        )
        .bind(user_id)
        .bind(old_hash)
        .bind(new_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session whose grant has expired.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete the session matching `(user_id, token_hash)`.
    ///
    /// Idempotent: revoking an absent session is a no-op returning `false`.
    pub async fn revoke(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND refresh_token_hash = $2")
                .bind(user_id)
                .bind(token_hash)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session a user holds (forced logout on all devices).
    /// Returns the count of deleted sessions.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
