//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod monitor;
pub mod pages;
pub mod project;
