/// In-memory member store
///
/// Keeps the three tables in process memory behind one async mutex. A
/// composite save checks every constraint before touching any table and
/// then appends all rows while still holding the lock, so readers never see
/// a partial registration and concurrent saves with the same email produce
/// exactly one success.
///
/// Column limits mirror the PostgreSQL schema (`VARCHAR(255)` for email and
/// password, `VARCHAR(64)` for name and nickname).
///
/// # Example
///
/// ```
/// use members_shared::models::{HobbyDraft, MemberDraft, ProfileDraft};
/// use members_shared::store::{InMemoryMemberStore, MemberStore};
///
/// # async fn example() -> Result<(), members_shared::store::StoreError> {
/// let store = InMemoryMemberStore::new();
/// let registered = store
///     .insert_member(MemberDraft {
///         email: "user@example.com".to_string(),
///         password: "secret1".to_string(),
///         profile: ProfileDraft {
///             name: "User".to_string(),
///             nickname: "user".to_string(),
///         },
///         hobbies: vec![HobbyDraft { hobby_id: 1 }],
///     })
///     .await?;
/// assert_eq!(registered.hobby_ids(), vec![1]);
/// # Ok(())
/// # }
/// ```

use super::{MemberStore, StoreError, TableCounts};
use crate::models::{Member, MemberDraft, MemberHobby, MemberProfile, RegisteredMember};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const EMAIL_COLUMN_LIMIT: usize = 255;
const PASSWORD_COLUMN_LIMIT: usize = 255;
const NAME_COLUMN_LIMIT: usize = 64;
const NICKNAME_COLUMN_LIMIT: usize = 64;

#[derive(Debug, Default)]
struct Tables {
    members: Vec<Member>,
    profiles: Vec<MemberProfile>,
    hobbies: Vec<MemberHobby>,
    next_member_id: i64,
    next_profile_id: i64,
    next_hobby_id: i64,
}

impl Tables {
    fn check(&self, draft: &MemberDraft) -> Result<(), StoreError> {
        let columns = [
            ("members.email", &draft.email, EMAIL_COLUMN_LIMIT),
            ("members.password", &draft.password, PASSWORD_COLUMN_LIMIT),
            ("member_profiles.name", &draft.profile.name, NAME_COLUMN_LIMIT),
            ("member_profiles.nickname", &draft.profile.nickname, NICKNAME_COLUMN_LIMIT),
        ];

        for (column, value, limit) in columns {
            if value.chars().count() > limit {
                return Err(StoreError::Constraint(format!(
                    "value too long for {} (limit {})",
                    column, limit
                )));
            }
        }

        if self.members.iter().any(|member| member.email == draft.email) {
            return Err(StoreError::DuplicateEmail);
        }

        Ok(())
    }

    fn assemble(&self, member: &Member) -> Option<RegisteredMember> {
        let profile = self
            .profiles
            .iter()
            .find(|profile| profile.member_id == member.id)?
            .clone();
        let hobbies = self
            .hobbies
            .iter()
            .filter(|hobby| hobby.member_id == member.id)
            .cloned()
            .collect();

        Some(RegisteredMember {
            member: member.clone(),
            profile,
            hobbies,
        })
    }
}

/// Member store kept in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All members in insertion order
    pub async fn members(&self) -> Vec<Member> {
        self.tables.lock().await.members.clone()
    }

    /// All profiles in insertion order
    pub async fn profiles(&self) -> Vec<MemberProfile> {
        self.tables.lock().await.profiles.clone()
    }

    /// All hobby links in insertion order
    pub async fn hobbies(&self) -> Vec<MemberHobby> {
        self.tables.lock().await.hobbies.clone()
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn insert_member(&self, draft: MemberDraft) -> Result<RegisteredMember, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.check(&draft)?;

        let now = Utc::now();

        tables.next_member_id += 1;
        let member = Member {
            id: tables.next_member_id,
            email: draft.email,
            password: draft.password,
            created: now,
            modified: now,
        };

        tables.next_profile_id += 1;
        let profile = MemberProfile {
            id: tables.next_profile_id,
            member_id: member.id,
            name: draft.profile.name,
            nickname: draft.profile.nickname,
            created: now,
            modified: now,
        };

        let mut hobbies = Vec::with_capacity(draft.hobbies.len());
        for hobby in draft.hobbies {
            tables.next_hobby_id += 1;
            hobbies.push(MemberHobby {
                id: tables.next_hobby_id,
                member_id: member.id,
                hobby_id: hobby.hobby_id,
                created: now,
                modified: now,
            });
        }

        tables.members.push(member.clone());
        tables.profiles.push(profile.clone());
        tables.hobbies.extend(hobbies.iter().cloned());

        debug!(member_id = member.id, hobbies = hobbies.len(), "Stored member registration");

        Ok(RegisteredMember {
            member,
            profile,
            hobbies,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RegisteredMember>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .members
            .iter()
            .find(|member| member.email == email)
            .and_then(|member| tables.assemble(member)))
    }

    async fn counts(&self) -> Result<TableCounts, StoreError> {
        let tables = self.tables.lock().await;
        Ok(TableCounts {
            members: tables.members.len() as i64,
            profiles: tables.profiles.len() as i64,
            hobbies: tables.hobbies.len() as i64,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HobbyDraft, ProfileDraft};

    fn draft(email: &str, hobby_ids: &[i32]) -> MemberDraft {
        MemberDraft {
            email: email.to_string(),
            password: "123456".to_string(),
            profile: ProfileDraft {
                name: "Test Taro".to_string(),
                nickname: "taro".to_string(),
            },
            hobbies: hobby_ids.iter().map(|&hobby_id| HobbyDraft { hobby_id }).collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_links() {
        let store = InMemoryMemberStore::new();
        let registered = store.insert_member(draft("a@example.jp", &[1, 2, 3])).await.unwrap();

        assert_eq!(registered.member.id, 1);
        assert_eq!(registered.profile.member_id, 1);
        assert_eq!(registered.hobby_ids(), vec![1, 2, 3]);
        assert!(registered.hobbies.iter().all(|h| h.member_id == registered.member.id));

        let counts = store.counts().await.unwrap();
        assert_eq!(counts, TableCounts { members: 1, profiles: 1, hobbies: 3 });
    }

    #[tokio::test]
    async fn test_duplicate_email_writes_nothing() {
        let store = InMemoryMemberStore::new();
        store.insert_member(draft("a@example.jp", &[1])).await.unwrap();

        let err = store.insert_member(draft("a@example.jp", &[1, 2, 3])).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));

        let counts = store.counts().await.unwrap();
        assert_eq!(counts, TableCounts { members: 1, profiles: 1, hobbies: 1 });
    }

    #[tokio::test]
    async fn test_profile_constraint_rolls_back_member() {
        let store = InMemoryMemberStore::new();
        let mut bad = draft("a@example.jp", &[1, 2]);
        bad.profile.nickname = "n".repeat(65);

        let err = store.insert_member(bad).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
        assert_eq!(store.counts().await.unwrap(), TableCounts::default());
        assert!(store.find_by_email("a@example.jp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = InMemoryMemberStore::new();
        store.insert_member(draft("a@example.jp", &[2])).await.unwrap();
        store.insert_member(draft("b@example.jp", &[4, 5])).await.unwrap();

        let found = store.find_by_email("b@example.jp").await.unwrap().unwrap();
        assert_eq!(found.member.id, 2);
        assert_eq!(found.profile.nickname, "taro");
        assert_eq!(found.hobby_ids(), vec![4, 5]);

        assert!(store.find_by_email("c@example.jp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_emails() {
        let store = InMemoryMemberStore::new();

        let (first, second) = tokio::join!(
            store.insert_member(draft("same@example.jp", &[1])),
            store.insert_member(draft("same@example.jp", &[2])),
        );

        assert_eq!(first.is_ok() as u8 + second.is_ok() as u8, 1);
        assert_eq!(store.counts().await.unwrap().members, 1);
    }
}
