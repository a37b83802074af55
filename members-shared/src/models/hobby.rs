/// Member hobby link model
///
/// One row per hobby selected at registration (one to three per member).
/// Ids are generated in insertion order, so ordering by id yields the
/// submission order.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE member_hobbies (
///     id BIGSERIAL PRIMARY KEY,
///     member_id BIGINT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
///     hobby_id INTEGER NOT NULL,
///     created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberHobby {
    pub id: i64,
    pub member_id: i64,

    /// Hobby catalog id
    pub hobby_id: i32,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl MemberHobby {
    /// Inserts a hobby link for `member_id`
    pub async fn create<'e, E>(executor: E, member_id: i64, hobby_id: i32) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let hobby = sqlx::query_as::<_, MemberHobby>(
            r#"
            INSERT INTO member_hobbies (member_id, hobby_id)
            VALUES ($1, $2)
            RETURNING id, member_id, hobby_id, created, modified
            "#,
        )
        .bind(member_id)
        .bind(hobby_id)
        .fetch_one(executor)
        .await?;

        Ok(hobby)
    }

    /// Lists the hobby links of `member_id` in insertion order
    pub async fn list_by_member<'e, E>(executor: E, member_id: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let hobbies = sqlx::query_as::<_, MemberHobby>(
            r#"
            SELECT id, member_id, hobby_id, created, modified
            FROM member_hobbies
            WHERE member_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(member_id)
        .fetch_all(executor)
        .await?;

        Ok(hobbies)
    }

    /// Counts all hobby links
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM member_hobbies")
            .fetch_one(executor)
            .await
    }
}
