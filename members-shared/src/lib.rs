//! # Members Shared Library
//!
//! Core of the member registration feature: validation and multi-table
//! persistence of a single registration form submission.
//!
//! ## Module Organization
//!
//! - `hobbies`: Hobby catalog (valid hobby ids and labels)
//! - `validation`: Submission snapshot, error map and rule engine
//! - `models`: Database models and drafts built from a submission
//! - `store`: Persistence abstraction (PostgreSQL and in-memory)
//! - `registration`: Composite save, store failures folded into error maps
//! - `form`: Form façade running validation and persistence
//! - `db`: Connection pool and migrations

pub mod db;
pub mod form;
pub mod hobbies;
pub mod models;
pub mod registration;
pub mod store;
pub mod validation;

/// Current version of the members shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
