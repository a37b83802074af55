/// Immutable snapshot of a submitted registration form
///
/// Field values arrive as strings from an HTML form. A missing key and an
/// empty string are both treated as "absent". When deserialized from JSON,
/// `null` is absent too and numbers are kept as their decimal text.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Field names of the registration form
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const NAME: &str = "name";
    pub const NICKNAME: &str = "nickname";
    pub const HOBBY1: &str = "hobby1";
    pub const HOBBY2: &str = "hobby2";
    pub const HOBBY3: &str = "hobby3";

    /// Hobby selection fields in submission order
    pub const HOBBIES: [&str; 3] = [HOBBY1, HOBBY2, HOBBY3];

    /// Every field the form accepts
    pub const ALL: [&str; 7] = [EMAIL, PASSWORD, NAME, NICKNAME, HOBBY1, HOBBY2, HOBBY3];
}

/// Submitted key/value data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Submission {
    values: BTreeMap<String, String>,
}

/// A submitted value as it may appear in a JSON body
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl RawValue {
    fn into_text(self) -> String {
        match self {
            RawValue::Text(text) => text,
            RawValue::Integer(n) => n.to_string(),
            RawValue::Unsigned(n) => n.to_string(),
            RawValue::Float(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Submission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<RawValue>>::deserialize(deserializer)?;

        Ok(Self {
            values: raw
                .into_iter()
                .filter_map(|(field, value)| value.map(|v| (field, v.into_text())))
                .collect(),
        })
    }
}

impl Submission {
    /// Creates an empty submission
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the submission with `field` set to `value`
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Returns the value of `field`, or `None` if it is missing or empty
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .get(field)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Returns true if `field` carries a non-empty value
    pub fn is_present(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Returns a hobby field's value unless it is absent or zero-valued
    ///
    /// A zero hobby counts as "not submitted" for uniqueness checks and
    /// entity building.
    pub fn selected_hobby(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !is_zero(value))
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for Submission {
    fn from(values: HashMap<String, String>) -> Self {
        values.into_iter().collect()
    }
}

/// Integer coercion: an optional leading `-` followed by ASCII digits only
pub fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses an integer-coercible value into a hobby id
///
/// Values that do not fit an `i32` can never be catalog keys and yield `None`.
pub fn parse_hobby_id(value: &str) -> Option<i32> {
    if !is_integer(value) {
        return None;
    }
    value.parse::<i32>().ok()
}

/// True for integer-coercible values equal to zero (`0`, `00`, `-0`)
pub fn is_zero(value: &str) -> bool {
    is_integer(value) && value.trim_start_matches('-').bytes().all(|b| b == b'0')
}

/// Compares two hobby values, numerically when both are integers
pub fn same_hobby(a: &str, b: &str) -> bool {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) if is_integer(a) && is_integer(b) => x == y,
        _ => a == b,
    }
}
