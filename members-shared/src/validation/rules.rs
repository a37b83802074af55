/// Rule descriptors and the registration validator
///
/// Rules are plain data: the field they report on, the code they report,
/// the check to run and the other fields the check reads. They are evaluated
/// in order against an immutable [`Submission`], so cross-field rules need no
/// extra state.
///
/// # Rule table
///
/// ```text
/// email      required, maxLength(255), email
/// password   required, minLength(6), maxLength(255)
/// name       required, maxLength(64)
/// nickname   required, maxLength(64)
/// hobby1     required, notInteger, isValidHobby, isUniqueHobby(hobby2, hobby3)
/// hobby2     notInteger, isValidHobby, isUniqueHobby(hobby1, hobby3)
/// hobby3     notInteger, isValidHobby, isUniqueHobby(hobby1, hobby2)
/// ```
///
/// Value checks only run on present values; an absent required field reports
/// `required` alone.

use super::submission::{fields, is_integer, parse_hobby_id, same_hobby, Submission};
use super::{ErrorMap, RuleCode};
use crate::hobbies::HobbyCatalog;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use validator::ValidateEmail;

pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const PASSWORD_MAX_LENGTH: usize = 255;
pub const NAME_MAX_LENGTH: usize = 64;
pub const NICKNAME_MAX_LENGTH: usize = 64;

/// Predicate a rule applies to its field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Value must be present
    Required,

    /// At least this many characters
    MinLength(usize),

    /// At most this many characters
    MaxLength(usize),

    /// Syntactically valid email address
    Email,

    /// Integer-coercible
    Integer,

    /// Key of the hobby catalog
    CatalogHobby,

    /// Differs from every selected hobby in `depends_on`
    DistinctHobby,
}

/// A single declarative validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Field the violation is reported on
    pub field: &'static str,

    /// Code reported when the check fails
    pub code: RuleCode,

    /// Check to evaluate
    pub check: Check,

    /// Other fields the check reads
    pub depends_on: &'static [&'static str],
}

impl Rule {
    fn new(field: &'static str, code: RuleCode, check: Check) -> Self {
        Self {
            field,
            code,
            check,
            depends_on: &[],
        }
    }

    fn reading(mut self, depends_on: &'static [&'static str]) -> Self {
        self.depends_on = depends_on;
        self
    }

    /// Evaluates the rule against a submission
    pub fn passes(&self, submission: &Submission, catalog: &HobbyCatalog) -> bool {
        let value = match (self.check, submission.get(self.field)) {
            (Check::Required, value) => return value.is_some(),
            (_, None) => return true,
            (_, Some(value)) => value,
        };

        match self.check {
            Check::Required => true,
            Check::MinLength(min) => value.chars().count() >= min,
            Check::MaxLength(max) => value.chars().count() <= max,
            Check::Email => is_email(value),
            Check::Integer => is_integer(value),
            Check::CatalogHobby => parse_hobby_id(value).is_some_and(|id| catalog.contains(id)),
            Check::DistinctHobby => {
                let Some(value) = submission.selected_hobby(self.field) else {
                    return true;
                };
                self.depends_on
                    .iter()
                    .filter_map(|other| submission.selected_hobby(other))
                    .all(|other| !same_hobby(value, other))
            }
        }
    }

    /// Default display message for a violation of this rule
    pub fn default_message(&self) -> String {
        match self.check {
            Check::Required => "This field is required.".to_string(),
            Check::MinLength(min) => format!("Must be at least {} characters long.", min),
            Check::MaxLength(max) => format!("Must be at most {} characters long.", max),
            Check::Email => "Please enter a valid email address.".to_string(),
            Check::Integer => "Please select a valid value.".to_string(),
            Check::CatalogHobby => "The selected hobby is invalid.".to_string(),
            Check::DistinctHobby => format!(
                "Choose a hobby different from {}.",
                self.depends_on.join(" and ")
            ),
        }
    }
}

/// Email format: accepted by `validator` and the domain ends in a
/// dotted alphabetic top-level label of two or more characters
fn is_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }

    let Some((_, domain)) = value.rsplit_once('@') else {
        return false;
    };

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// The ordered rule set of the registration form
pub fn registration_rules() -> Vec<Rule> {
    use fields::*;

    vec![
        Rule::new(EMAIL, RuleCode::Required, Check::Required),
        Rule::new(EMAIL, RuleCode::MaxLength, Check::MaxLength(EMAIL_MAX_LENGTH)),
        Rule::new(EMAIL, RuleCode::Email, Check::Email),
        Rule::new(PASSWORD, RuleCode::Required, Check::Required),
        Rule::new(PASSWORD, RuleCode::MinLength, Check::MinLength(PASSWORD_MIN_LENGTH)),
        Rule::new(PASSWORD, RuleCode::MaxLength, Check::MaxLength(PASSWORD_MAX_LENGTH)),
        Rule::new(NAME, RuleCode::Required, Check::Required),
        Rule::new(NAME, RuleCode::MaxLength, Check::MaxLength(NAME_MAX_LENGTH)),
        Rule::new(NICKNAME, RuleCode::Required, Check::Required),
        Rule::new(NICKNAME, RuleCode::MaxLength, Check::MaxLength(NICKNAME_MAX_LENGTH)),
        Rule::new(HOBBY1, RuleCode::Required, Check::Required),
        Rule::new(HOBBY1, RuleCode::NotInteger, Check::Integer),
        Rule::new(HOBBY1, RuleCode::IsValidHobby, Check::CatalogHobby),
        Rule::new(HOBBY1, RuleCode::IsUniqueHobby, Check::DistinctHobby).reading(&[HOBBY2, HOBBY3]),
        Rule::new(HOBBY2, RuleCode::NotInteger, Check::Integer),
        Rule::new(HOBBY2, RuleCode::IsValidHobby, Check::CatalogHobby),
        Rule::new(HOBBY2, RuleCode::IsUniqueHobby, Check::DistinctHobby).reading(&[HOBBY1, HOBBY3]),
        Rule::new(HOBBY3, RuleCode::NotInteger, Check::Integer),
        Rule::new(HOBBY3, RuleCode::IsValidHobby, Check::CatalogHobby),
        Rule::new(HOBBY3, RuleCode::IsUniqueHobby, Check::DistinctHobby).reading(&[HOBBY1, HOBBY2]),
    ]
}

/// Field and cross-field rule engine for the registration form
///
/// The hobby catalog is injected at construction. Messages can be replaced
/// per field and code with [`Validator::with_message`].
#[derive(Debug, Clone)]
pub struct Validator {
    catalog: Arc<HobbyCatalog>,
    rules: Vec<Rule>,
    messages: HashMap<(&'static str, RuleCode), String>,
}

impl Validator {
    /// Creates a validator with the registration rule set
    pub fn new(catalog: Arc<HobbyCatalog>) -> Self {
        Self {
            catalog,
            rules: registration_rules(),
            messages: HashMap::new(),
        }
    }

    /// Replaces the message reported for `code` on `field`
    pub fn with_message(
        mut self,
        field: &'static str,
        code: RuleCode,
        message: impl Into<String>,
    ) -> Self {
        self.messages.insert((field, code), message.into());
        self
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The catalog hobby selections are checked against
    pub fn catalog(&self) -> &HobbyCatalog {
        &self.catalog
    }

    /// Validates a submission; an empty map means valid
    pub fn validate(&self, submission: &Submission) -> ErrorMap {
        let mut errors = ErrorMap::new();

        for rule in &self.rules {
            if rule.passes(submission, &self.catalog) {
                continue;
            }

            let message = self
                .messages
                .get(&(rule.field, rule.code))
                .cloned()
                .unwrap_or_else(|| rule.default_message());
            errors.add(rule.field, rule.code, message);
        }

        if !errors.is_empty() {
            debug!(fields = errors.len(), "Submission failed validation");
        }

        errors
    }
}
