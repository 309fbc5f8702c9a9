//! Shared domain types for the vigil monitoring platform.
//!
//! This crate is dependency-light on purpose: everything here is plain
//! data used across the db, probe, and api crates.

pub mod category;
pub mod error;
pub mod probe;
pub mod types;
