//! Request middleware.
//!
//! - [`auth`] -- the [`auth::CurrentUser`] extractor for protected handlers.
//! - [`gatekeeper`] -- page-navigation routing based on cookie state.

pub mod auth;
pub mod gatekeeper;

pub use auth::CurrentUser;
