/// Member model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE members (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(255) NOT NULL,
///     password VARCHAR(255) NOT NULL,
///     created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT members_email_unique UNIQUE (email)
/// );
/// ```
///
/// Operations take any PostgreSQL executor so they can run on the pool or
/// inside a transaction (`&mut *tx`).
///
/// # Example
///
/// ```no_run
/// use members_shared::models::member::Member;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
/// let member = Member::create(&mut *tx, "user@example.com", "secret1").await?;
/// tx.commit().await?;
///
/// let found = Member::find_by_email(&pool, "user@example.com").await?;
/// assert_eq!(found.map(|m| m.id), Some(member.id));
/// # Ok(())
/// # }
/// ```

use super::hobby::MemberHobby;
use super::profile::MemberProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// A registered member account
///
/// The password is stored as submitted and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    /// Generated member id
    pub id: i64,

    /// Email address, unique across all members
    pub email: String,

    /// Password as submitted
    #[serde(skip_serializing, default)]
    pub password: String,

    /// When the member was created
    pub created: DateTime<Utc>,

    /// When the member was last modified
    pub modified: DateTime<Utc>,
}

/// A member with its profile and hobby links, as persisted by one
/// composite save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredMember {
    pub member: Member,
    pub profile: MemberProfile,
    /// Hobby links in submission order
    pub hobbies: Vec<MemberHobby>,
}

impl RegisteredMember {
    /// Hobby ids in submission order
    pub fn hobby_ids(&self) -> Vec<i32> {
        self.hobbies.iter().map(|hobby| hobby.hobby_id).collect()
    }
}

impl Member {
    /// Inserts a member row
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered (unique constraint
    /// `members_email_unique`) or the database operation fails.
    pub async fn create<'e, E>(executor: E, email: &str, password: &str) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (email, password)
            VALUES ($1, $2)
            RETURNING id, email, password, created, modified
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_one(executor)
        .await?;

        Ok(member)
    }

    /// Finds a member by email address (exact match)
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, email, password, created, modified
            FROM members
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(member)
    }

    /// Counts all members
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(executor)
            .await?;

        Ok(count)
    }
}
