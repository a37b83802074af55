/// Member persistence
///
/// [`MemberStore`] is the seam between the registration pipeline and the
/// backing store. A store inserts a [`MemberDraft`] as one composite save:
/// the member, its profile and every hobby link become visible together or
/// not at all, and the email uniqueness constraint is enforced by the store.
///
/// # Implementations
///
/// - [`PgMemberStore`]: PostgreSQL via sqlx, one transaction per save
/// - [`InMemoryMemberStore`]: process-local tables behind an async mutex

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMemberStore;
pub use postgres::PgMemberStore;

use crate::models::{MemberDraft, RegisteredMember};
use async_trait::async_trait;
use serde::Serialize;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The email is already registered
    #[error("Email already registered")]
    DuplicateEmail,

    /// A column or table constraint rejected the write
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// The store cannot serve requests
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Unique constraint guarding `members.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "members_email_unique";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let on_email = db_err
                .constraint()
                .is_some_and(|constraint| constraint == EMAIL_UNIQUE_CONSTRAINT || constraint.contains("email"));

            if db_err.is_unique_violation() && on_email {
                return StoreError::DuplicateEmail;
            }
        }

        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// Row counts per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub members: i64,
    pub profiles: i64,
    pub hobbies: i64,
}

/// Backing store for registered members
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Inserts the member, its profile and its hobby links atomically
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateEmail`] if the email is already registered
    /// - any other variant if the write failed; nothing is persisted
    async fn insert_member(&self, draft: MemberDraft) -> Result<RegisteredMember, StoreError>;

    /// Loads a registered member with its profile and hobby links
    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredMember>, StoreError>;

    /// Counts rows in each table
    async fn counts(&self) -> Result<TableCounts, StoreError>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}
