//! Dataset metadata.
//!
//! Metadata is a flat string-keyed map delivered alongside the dataset by
//! the acquisition layer. The engine depends on a single recognized key,
//! [`LAST_UPDATE_KEY`], plus an optional per-column description map used
//! by the metadata-quality scorer. Missing keys are valid and degrade to
//! documented default scores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Metadata key holding the ISO-8601 last-update timestamp.
pub const LAST_UPDATE_KEY: &str = "last_update_time";

/// Flat metadata record for a dataset.
///
/// # Examples
///
/// ```
/// use datatrust::Metadata;
///
/// let meta = Metadata::new()
///     .with_entry("title", "shopping_trends.csv")
///     .with_entry("last_update_time", "2026-08-20")
///     .with_description("age", "Customer age in years");
///
/// assert_eq!(meta.last_update_time(), Some("2026-08-20"));
/// assert!(meta.descriptions().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    entries: BTreeMap<String, String>,

    /// Per-column human-readable descriptions, if supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    descriptions: Option<BTreeMap<String, String>>,
}

impl Metadata {
    /// Creates an empty metadata record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a flat key/value entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Adds a per-column description.
    #[must_use]
    pub fn with_description(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptions
            .get_or_insert_with(BTreeMap::new)
            .insert(column.into(), text.into());
        self
    }

    /// Looks up a flat entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The last-update timestamp entry, if present and non-empty.
    #[must_use]
    pub fn last_update_time(&self) -> Option<&str> {
        self.get(LAST_UPDATE_KEY).filter(|s| !s.is_empty())
    }

    /// The per-column description map, if one was supplied.
    #[must_use]
    pub fn descriptions(&self) -> Option<&BTreeMap<String, String>> {
        self.descriptions.as_ref()
    }

    /// Ingests a flat JSON object produced by the acquisition layer.
    ///
    /// String, number, and boolean values are stringified; `null` entries
    /// are dropped. Nested arrays/objects are rejected — the metadata
    /// contract is a flat map.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnsupportedMetadataValue` for nested
    /// values, naming the offending key.
    pub fn from_json(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self, ValidationError> {
        use serde_json::Value;

        let mut meta = Self::new();
        for (key, value) in object {
            let rendered = match value {
                Value::Null => continue,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::String(s) => s.clone(),
                Value::Array(_) => {
                    return Err(ValidationError::UnsupportedMetadataValue {
                        key: key.clone(),
                        kind: "array",
                    })
                }
                Value::Object(_) => {
                    return Err(ValidationError::UnsupportedMetadataValue {
                        key: key.clone(),
                        kind: "object",
                    })
                }
            };
            meta.entries.insert(key.clone(), rendered);
        }
        Ok(meta)
    }
}
