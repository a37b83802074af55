/// Registration form validation
///
/// This module turns a [`Submission`] into an [`ErrorMap`]: field name →
/// violated rule codes, each with a display message. An empty map means the
/// submission is valid.
///
/// # Modules
///
/// - `submission`: immutable snapshot of the submitted fields
/// - `rules`: ordered rule descriptors and the [`Validator`] that evaluates them
///
/// # Example
///
/// ```
/// use members_shared::hobbies::HobbyCatalog;
/// use members_shared::validation::{RuleCode, Submission, Validator};
/// use std::sync::Arc;
///
/// let validator = Validator::new(Arc::new(HobbyCatalog::default()));
/// let errors = validator.validate(&Submission::new().with("password", "12345"));
///
/// assert!(errors.has("email", RuleCode::Required));
/// assert!(errors.has("password", RuleCode::MinLength));
/// ```

pub mod rules;
pub mod submission;

pub use rules::{Check, Rule, Validator};
pub use submission::{fields, Submission};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named rule violation codes as they appear in the error map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCode {
    /// Field is missing or empty
    Required,

    /// Value is shorter than the minimum length
    MinLength,

    /// Value is longer than the maximum length
    MaxLength,

    /// Value is not a syntactically valid email address
    Email,

    /// Value is not integer-coercible
    NotInteger,

    /// Hobby id is not in the catalog
    IsValidHobby,

    /// Hobby id repeats another hobby field
    IsUniqueHobby,

    /// Email is already registered
    IsUnique,

    /// Unexpected persistence failure
    Exception,
}

impl RuleCode {
    /// Returns the code as used in error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCode::Required => "required",
            RuleCode::MinLength => "minLength",
            RuleCode::MaxLength => "maxLength",
            RuleCode::Email => "email",
            RuleCode::NotInteger => "notInteger",
            RuleCode::IsValidHobby => "isValidHobby",
            RuleCode::IsUniqueHobby => "isUniqueHobby",
            RuleCode::IsUnique => "isUnique",
            RuleCode::Exception => "exception",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic error map key for unexpected persistence failures
pub const EXCEPTION_FIELD: &str = "exception";

/// Field-keyed collection of rule violations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap {
    fields: BTreeMap<String, BTreeMap<RuleCode, String>>,
}

/// One flattened error map entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError<'a> {
    pub field: &'a str,
    pub code: RuleCode,
    pub message: &'a str,
}

impl ErrorMap {
    /// Creates an empty error map
    pub const fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Error map for an unexpected persistence failure
    pub fn exception(diagnostic: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(EXCEPTION_FIELD, RuleCode::Exception, diagnostic);
        errors
    }

    /// Records a violation of `code` on `field`
    pub fn add(&mut self, field: impl Into<String>, code: RuleCode, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(code, message.into());
    }

    /// True if no violations were recorded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one violation
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if `field` carries `code`
    pub fn has(&self, field: &str, code: RuleCode) -> bool {
        self.fields
            .get(field)
            .is_some_and(|codes| codes.contains_key(&code))
    }

    /// Violations recorded on `field`
    pub fn field(&self, field: &str) -> Option<&BTreeMap<RuleCode, String>> {
        self.fields.get(field)
    }

    /// Codes recorded on `field`, in code order
    pub fn codes(&self, field: &str) -> Vec<RuleCode> {
        self.fields
            .get(field)
            .map(|codes| codes.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Names of fields with violations
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// True if this map carries an unexpected persistence failure
    pub fn is_exception(&self) -> bool {
        self.has(EXCEPTION_FIELD, RuleCode::Exception)
    }

    /// Folds `other` into this map
    pub fn merge(&mut self, other: ErrorMap) {
        for (field, codes) in other.fields {
            self.fields.entry(field).or_default().extend(codes);
        }
    }

    /// Flattens the map into `(field, code, message)` entries
    pub fn iter(&self) -> impl Iterator<Item = FieldError<'_>> {
        self.fields.iter().flat_map(|(field, codes)| {
            codes.iter().map(move |(code, message)| FieldError {
                field: field.as_str(),
                code: *code,
                message: message.as_str(),
            })
        })
    }
}
