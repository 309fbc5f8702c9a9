//! Shared response envelope types for API handlers.
//!
//! The aggregate endpoints (dashboard, monitor refresh) wrap their payload
//! in a `{ "data": ... }` envelope; entity endpoints return the resource
//! bare. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
