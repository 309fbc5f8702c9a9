//! Refresh-token session model.

use sqlx::FromRow;
use vigil_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
///
/// Binds one refresh-token grant (by hash) to its owning user; its
/// presence is the single source of truth for "is this refresh token
/// still valid". `expires_at` mirrors the token's own `exp` claim so
/// rows for cryptographically dead tokens can be purged.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
