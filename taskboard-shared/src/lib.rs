//! # Taskboard Shared Library
//!
//! Data access and validation for the Taskboard API.
//!
//! ## Module Organization
//!
//! - `models`: Row types and single-statement queries
//! - `store`: Persistence gateway trait with Postgres and in-memory backends
//! - `domain`: Required fields, referential checks, uniqueness, hashing
//! - `auth`: Password hashing
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod domain;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
