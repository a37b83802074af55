/// Member registration form
///
/// [`AddMemberForm`] runs one submission through the pipeline:
///
/// ```text
/// Submission ─▶ Validator ──(errors)──────────────────────────▶ Resolved(Failed)
///                   │
///                   └─(valid)─▶ MemberDraft ─▶ Registrar ─┬─▶ Resolved(Registered)
///                                                         └─▶ Resolved(Failed)
/// ```
///
/// Persistence is only attempted when validation produced no errors.
///
/// # Example
///
/// ```
/// use members_shared::form::AddMemberForm;
/// use members_shared::hobbies::HobbyCatalog;
/// use members_shared::store::InMemoryMemberStore;
/// use members_shared::validation::{Submission, Validator};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let validator = Arc::new(Validator::new(Arc::new(HobbyCatalog::default())));
/// let mut form = AddMemberForm::new(validator, Arc::new(InMemoryMemberStore::new()));
///
/// let submission = Submission::new()
///     .with("email", "user@example.com")
///     .with("password", "secret1")
///     .with("name", "User")
///     .with("nickname", "user")
///     .with("hobby1", "1");
///
/// assert!(form.execute(&submission).await);
/// assert!(form.errors().is_empty());
/// # }
/// ```

use crate::models::{MemberDraft, RegisteredMember};
use crate::registration::Registrar;
use crate::store::MemberStore;
use crate::validation::{ErrorMap, Submission, Validator};
use std::sync::Arc;
use tracing::debug;

static NO_ERRORS: ErrorMap = ErrorMap::new();

/// Result of one `execute` call
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Member, profile and hobby links were persisted
    Registered(RegisteredMember),

    /// Validation or persistence failed; nothing was persisted
    Failed(ErrorMap),
}

/// Form state
#[derive(Debug, Clone, Default)]
pub enum FormState {
    /// No submission processed yet
    #[default]
    Idle,

    /// Holds the outcome of the most recent submission
    Resolved(Outcome),
}

/// Validates and persists a member registration submission
pub struct AddMemberForm {
    validator: Arc<Validator>,
    registrar: Registrar,
    state: FormState,
}

impl AddMemberForm {
    pub fn new(validator: Arc<Validator>, store: Arc<dyn MemberStore>) -> Self {
        Self {
            validator,
            registrar: Registrar::new(store),
            state: FormState::Idle,
        }
    }

    /// Processes a submission
    ///
    /// Returns true iff validation passed and the composite save succeeded.
    /// Each call replaces the outcome of the previous one.
    pub async fn execute(&mut self, submission: &Submission) -> bool {
        let mut errors = self.validator.validate(submission);

        let outcome = if errors.is_empty() {
            let draft = MemberDraft::from_submission(submission);
            match self.registrar.register(draft).await {
                Ok(registered) => Outcome::Registered(registered),
                Err(store_errors) => {
                    errors.merge(store_errors);
                    Outcome::Failed(errors)
                }
            }
        } else {
            debug!(
                fields = ?errors.field_names().collect::<Vec<_>>(),
                "Registration rejected by validation"
            );
            Outcome::Failed(errors)
        };

        let success = matches!(outcome, Outcome::Registered(_));
        self.state = FormState::Resolved(outcome);
        success
    }

    /// Errors of the most recent `execute` call
    ///
    /// Empty before the first call and after a successful one.
    pub fn errors(&self) -> &ErrorMap {
        match &self.state {
            FormState::Resolved(Outcome::Failed(errors)) => errors,
            _ => &NO_ERRORS,
        }
    }

    /// The member persisted by the most recent `execute` call
    pub fn registered(&self) -> Option<&RegisteredMember> {
        match &self.state {
            FormState::Resolved(Outcome::Registered(registered)) => Some(registered),
            _ => None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Consumes the form, returning the outcome of the last submission
    pub fn into_outcome(self) -> Option<Outcome> {
        match self.state {
            FormState::Idle => None,
            FormState::Resolved(outcome) => Some(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hobbies::HobbyCatalog;
    use crate::store::InMemoryMemberStore;
    use crate::validation::RuleCode;

    fn form() -> AddMemberForm {
        let validator = Arc::new(Validator::new(Arc::new(HobbyCatalog::default())));
        AddMemberForm::new(validator, Arc::new(InMemoryMemberStore::new()))
    }

    fn valid() -> Submission {
        Submission::new()
            .with("email", "test@example.jp")
            .with("password", "123456")
            .with("name", "Test Taro")
            .with("nickname", "taro")
            .with("hobby1", "1")
    }

    #[tokio::test]
    async fn test_idle_form_has_no_errors() {
        let form = form();
        assert!(matches!(form.state(), FormState::Idle));
        assert!(form.errors().is_empty());
        assert!(form.registered().is_none());
    }

    #[tokio::test]
    async fn test_failure_then_success_resets_errors() {
        let mut form = form();

        assert!(!form.execute(&Submission::new()).await);
        assert!(form.errors().has("email", RuleCode::Required));
        assert!(form.registered().is_none());

        assert!(form.execute(&valid()).await);
        assert!(form.errors().is_empty());
        assert_eq!(form.registered().map(|r| r.hobby_ids()), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_into_outcome() {
        let mut form = form();
        form.execute(&valid()).await;

        match form.into_outcome() {
            Some(Outcome::Registered(registered)) => {
                assert_eq!(registered.member.email, "test@example.jp")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
