/// Member profile model
///
/// Exactly one profile exists per member; it is created in the same
/// transaction as the member and removed with it.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE member_profiles (
///     id BIGSERIAL PRIMARY KEY,
///     member_id BIGINT NOT NULL REFERENCES members(id) ON DELETE CASCADE,
///     name VARCHAR(64) NOT NULL,
///     nickname VARCHAR(64) NOT NULL,
///     created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     modified TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT member_profiles_member_unique UNIQUE (member_id)
/// );
/// ```

use super::draft::ProfileDraft;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberProfile {
    pub id: i64,

    /// Owning member
    pub member_id: i64,

    /// Display name
    pub name: String,

    pub nickname: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl MemberProfile {
    /// Inserts the profile of `member_id`
    pub async fn create<'e, E>(
        executor: E,
        member_id: i64,
        draft: &ProfileDraft,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, MemberProfile>(
            r#"
            INSERT INTO member_profiles (member_id, name, nickname)
            VALUES ($1, $2, $3)
            RETURNING id, member_id, name, nickname, created, modified
            "#,
        )
        .bind(member_id)
        .bind(&draft.name)
        .bind(&draft.nickname)
        .fetch_one(executor)
        .await?;

        Ok(profile)
    }

    /// Finds the profile of `member_id`
    pub async fn find_by_member<'e, E>(executor: E, member_id: i64) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let profile = sqlx::query_as::<_, MemberProfile>(
            r#"
            SELECT id, member_id, name, nickname, created, modified
            FROM member_profiles
            WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(executor)
        .await?;

        Ok(profile)
    }

    /// Counts all profiles
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM member_profiles")
            .fetch_one(executor)
            .await
    }
}
