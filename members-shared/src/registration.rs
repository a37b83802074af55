/// Composite save of a member registration
///
/// [`Registrar`] hands a [`MemberDraft`] to the store and folds store
/// failures into the error map shape the form reports:
///
/// - duplicate email → `email: isUnique`
/// - anything else → `exception: <diagnostic>`, logged at error level
///
/// The diagnostic in the `exception` entry is meant for operators; the HTTP
/// layer never renders it to end users.

use crate::models::{MemberDraft, RegisteredMember};
use crate::store::{MemberStore, StoreError};
use crate::validation::{fields, ErrorMap, RuleCode};
use std::sync::Arc;
use tracing::{error, info};

/// Message reported with `email: isUnique`
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email address is already registered.";

/// Persists registrations through a [`MemberStore`]
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn MemberStore>,
}

impl Registrar {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// Saves the draft as one unit
    ///
    /// # Errors
    ///
    /// Returns the error map describing why nothing was persisted.
    pub async fn register(&self, draft: MemberDraft) -> Result<RegisteredMember, ErrorMap> {
        match self.store.insert_member(draft).await {
            Ok(registered) => {
                info!(
                    member_id = registered.member.id,
                    hobbies = registered.hobbies.len(),
                    "Member registered"
                );
                Ok(registered)
            }
            Err(StoreError::DuplicateEmail) => {
                info!("Registration rejected: email already registered");
                let mut errors = ErrorMap::new();
                errors.add(fields::EMAIL, RuleCode::IsUnique, DUPLICATE_EMAIL_MESSAGE);
                Err(errors)
            }
            Err(err) => {
                error!(error = %err, "Failed to persist member registration");
                Err(ErrorMap::exception(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HobbyDraft, ProfileDraft};
    use crate::store::{InMemoryMemberStore, TableCounts};
    use async_trait::async_trait;

    struct UnreachableStore;

    #[async_trait]
    impl MemberStore for UnreachableStore {
        async fn insert_member(&self, _draft: MemberDraft) -> Result<RegisteredMember, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find_by_email(&self, _email: &str) -> Result<Option<RegisteredMember>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn counts(&self) -> Result<TableCounts, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn draft(email: &str) -> MemberDraft {
        MemberDraft {
            email: email.to_string(),
            password: "123456".to_string(),
            profile: ProfileDraft {
                name: "Test Taro".to_string(),
                nickname: "taro".to_string(),
            },
            hobbies: vec![HobbyDraft { hobby_id: 1 }, HobbyDraft { hobby_id: 3 }],
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let registrar = Registrar::new(Arc::new(InMemoryMemberStore::new()));
        let registered = registrar.register(draft("test@example.jp")).await.unwrap();

        assert_eq!(registered.member.email, "test@example.jp");
        assert_eq!(registered.hobby_ids(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_is_unique() {
        let registrar = Registrar::new(Arc::new(InMemoryMemberStore::new()));
        registrar.register(draft("test@example.jp")).await.unwrap();

        let errors = registrar.register(draft("test@example.jp")).await.unwrap_err();
        assert_eq!(errors.codes("email"), vec![RuleCode::IsUnique]);
        assert!(!errors.is_exception());
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_exception() {
        let registrar = Registrar::new(Arc::new(UnreachableStore));

        let errors = registrar.register(draft("test@example.jp")).await.unwrap_err();
        assert!(errors.is_exception());
        assert_eq!(errors.len(), 1);
    }

    #[tokio::test]
    async fn test_constraint_failure_maps_to_exception() {
        let store = Arc::new(InMemoryMemberStore::new());
        let registrar = Registrar::new(store.clone());

        let mut bad = draft("test@example.jp");
        bad.profile.name = "x".repeat(65);

        let errors = registrar.register(bad).await.unwrap_err();
        assert!(errors.is_exception());
        assert_eq!(store.counts().await.unwrap(), TableCounts::default());
    }
}
