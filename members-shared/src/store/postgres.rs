/// PostgreSQL member store
///
/// Each composite save runs in a single transaction: the member row is
/// inserted first, then its profile, then the hobby links in submission
/// order. The transaction commits only after every insert succeeds; on any
/// error it is dropped and rolled back, so no partial registration is ever
/// visible. Concurrent registrations with the same email are serialized by
/// the `members_email_unique` constraint.
///
/// # Example
///
/// ```no_run
/// use members_shared::db::pool::{create_pool, DatabaseConfig};
/// use members_shared::store::{MemberStore, PgMemberStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgMemberStore::new(pool);
/// let counts = store.counts().await?;
/// println!("{} members", counts.members);
/// # Ok(())
/// # }
/// ```

use super::{MemberStore, StoreError, TableCounts};
use crate::db::pool::health_check;
use crate::models::{Member, MemberDraft, MemberHobby, MemberProfile, RegisteredMember};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Member store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgMemberStore {
    pool: PgPool,
}

impl PgMemberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MemberStore for PgMemberStore {
    async fn insert_member(&self, draft: MemberDraft) -> Result<RegisteredMember, StoreError> {
        let mut tx = self.pool.begin().await?;

        let member = Member::create(&mut *tx, &draft.email, &draft.password).await?;
        let profile = MemberProfile::create(&mut *tx, member.id, &draft.profile).await?;

        let mut hobbies = Vec::with_capacity(draft.hobbies.len());
        for hobby in &draft.hobbies {
            hobbies.push(MemberHobby::create(&mut *tx, member.id, hobby.hobby_id).await?);
        }

        tx.commit().await?;

        debug!(
            member_id = member.id,
            hobbies = hobbies.len(),
            "Committed member registration"
        );

        Ok(RegisteredMember {
            member,
            profile,
            hobbies,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredMember>, StoreError> {
        let Some(member) = Member::find_by_email(&self.pool, email).await? else {
            return Ok(None);
        };

        let profile = MemberProfile::find_by_member(&self.pool, member.id)
            .await?
            .ok_or_else(|| {
                StoreError::Constraint(format!("Member {} has no profile", member.id))
            })?;
        let hobbies = MemberHobby::list_by_member(&self.pool, member.id).await?;

        Ok(Some(RegisteredMember {
            member,
            profile,
            hobbies,
        }))
    }

    async fn counts(&self) -> Result<TableCounts, StoreError> {
        Ok(TableCounts {
            members: Member::count(&self.pool).await?,
            profiles: MemberProfile::count(&self.pool).await?,
            hobbies: MemberHobby::count(&self.pool).await?,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        health_check(&self.pool).await?;
        Ok(())
    }
}
