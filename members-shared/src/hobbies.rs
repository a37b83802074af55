/// Hobby catalog
///
/// The catalog is the static id → label table bounding which hobby ids a
/// member may select. It is resolved once at startup (from a configuration
/// file or the built-in defaults) and handed to the [`Validator`] and the
/// HTTP layer as an explicit dependency.
///
/// # Configuration file
///
/// Any format supported by the `config` crate works, keyed by a `hobbies`
/// table:
///
/// ```toml
/// [hobbies]
/// 1 = "Reading"
/// 2 = "Music"
/// 3 = "Sports"
/// ```
///
/// [`Validator`]: crate::validation::Validator

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// Error type for catalog loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The configuration source could not be read or parsed
    #[error("Failed to load hobby catalog: {0}")]
    Load(#[from] config::ConfigError),

    /// A catalog key is not an integer
    #[error("Hobby id is not an integer: {0}")]
    InvalidId(String),

    /// Catalog ids start at 1
    #[error("Hobby id must be positive: {0}")]
    NonPositiveId(i32),

    /// The catalog has no entries
    #[error("Hobby catalog is empty")]
    Empty,
}

/// A single selectable hobby
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbyEntry {
    /// Hobby id (as submitted in `hobby1`..`hobby3`)
    pub id: i32,

    /// Display label
    pub label: String,
}

/// Read-only hobby id → label mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HobbyCatalog {
    entries: BTreeMap<i32, String>,
}

impl HobbyCatalog {
    /// Builds a catalog from `(id, label)` pairs
    ///
    /// # Errors
    ///
    /// Returns an error if any id is zero or negative, or if no entries are given.
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (id, label) in entries {
            if id <= 0 {
                return Err(CatalogError::NonPositiveId(id));
            }
            map.insert(id, label.into());
        }

        if map.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { entries: map })
    }

    /// Loads the catalog from the `hobbies` table of a configuration file
    ///
    /// The file format is inferred from the extension (`.toml`, `.json`, `.yaml`).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading hobby catalog");

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;

        let raw: HashMap<String, String> = settings.get("hobbies")?;

        let mut entries = Vec::with_capacity(raw.len());
        for (key, label) in raw {
            let id = key
                .trim()
                .parse::<i32>()
                .map_err(|_| CatalogError::InvalidId(key.clone()))?;
            entries.push((id, label));
        }

        let catalog = Self::new(entries)?;
        info!(hobbies = catalog.len(), "Hobby catalog loaded");
        Ok(catalog)
    }

    /// Returns true if `id` is a selectable hobby
    pub fn contains(&self, id: i32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the display label for `id`
    pub fn label(&self, id: i32) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Number of selectable hobbies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog entries in ascending id order
    pub fn entries(&self) -> Vec<HobbyEntry> {
        self.entries
            .iter()
            .map(|(id, label)| HobbyEntry {
                id: *id,
                label: label.clone(),
            })
            .collect()
    }
}

impl Default for HobbyCatalog {
    fn default() -> Self {
        let entries = [
            (1, "Reading"),
            (2, "Music"),
            (3, "Sports"),
            (4, "Movies"),
            (5, "Travel"),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|(id, label)| (id, label.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = HobbyCatalog::default();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.contains(1));
        assert!(catalog.contains(5));
        assert!(!catalog.contains(0));
        assert!(!catalog.contains(6));
        assert_eq!(catalog.label(2), Some("Music"));
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let err = HobbyCatalog::new([(0, "Nothing")]).unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveId(0)));

        let err = HobbyCatalog::new([(1, "Reading"), (-3, "Negative")]).unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveId(-3)));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        let err = HobbyCatalog::new(Vec::<(i32, String)>::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty));
    }

    #[test]
    fn test_entries_are_ordered() {
        let catalog = HobbyCatalog::new([(3, "C"), (1, "A"), (2, "B")]).unwrap();
        let ids: Vec<i32> = catalog.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join(format!("hobbies-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hobbies.toml");
        std::fs::write(&path, "[hobbies]\n1 = \"Chess\"\n7 = \"Go\"\n").unwrap();

        let catalog = HobbyCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.label(7), Some("Go"));
        assert!(!catalog.contains(2));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_file_rejects_bad_key() {
        let dir = std::env::temp_dir().join(format!("hobbies-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hobbies.json");
        std::fs::write(&path, r#"{"hobbies": {"one": "Chess"}}"#).unwrap();

        let err = HobbyCatalog::from_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)));

        std::fs::remove_dir_all(&dir).ok();
    }
}
