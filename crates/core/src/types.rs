//! Primitive aliases used across users, sessions, projects, and history.

/// Database primary/foreign key. Every table uses PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// UTC timestamp as stored in TIMESTAMPTZ columns (session expiry,
/// probe observation times, row creation).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
