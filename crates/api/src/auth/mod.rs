//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 token issuance, verification, and refresh-token hashing.
//! - [`cookies`] -- the credential cookie transport.
//! - [`resolver`] -- the access-then-refresh identity resolution chain.

pub mod cookies;
pub mod jwt;
pub mod password;
pub mod resolver;
