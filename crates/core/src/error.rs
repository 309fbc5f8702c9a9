//! Domain error taxonomy shared across the workspace.
//!
//! Four failure shapes cover this system: an entity lookup that
//! missed, input that fails a policy, a write that collides with
//! existing state, and a request with no valid identity behind it.
//! The api crate maps each to an HTTP status.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist or is not visible to the caller.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input violates a policy (field lengths, email shape, probe
    /// preconditions).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The write collides with state that already exists, such as a
    /// second account on the same email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No valid credential backs the request.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
