// Media Type Whitelist

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Built-in media types: lowercase key and display label
pub const DEFAULT_MEDIA_TYPES: [(&str, &str); 3] =
    [("chat", "Chat"), ("email", "E-mail"), ("voice", "Voice")];

/// Media types recognized in queue names, with the labels shown next to
/// their toggle controls.
///
/// Keys are lowercase. Entry order is kept for display only; row order is
/// decided by the queue list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTypeWhitelist {
    entries: Vec<(String, String)>,
}

impl MediaTypeWhitelist {
    /// Build a whitelist from `(key, label)` pairs.
    ///
    /// Keys are lowercased. Empty or duplicate keys are rejected.
    pub fn new<K, L>(entries: impl IntoIterator<Item = (K, L)>) -> Result<Self>
    where
        K: AsRef<str>,
        L: Into<String>,
    {
        let mut whitelist = Self {
            entries: Vec::new(),
        };
        for (key, label) in entries {
            whitelist.insert(key.as_ref(), label.into())?;
        }
        Ok(whitelist)
    }

    /// Extend with additional entries (e.g. from configuration)
    pub fn with_entries<K, L>(mut self, entries: impl IntoIterator<Item = (K, L)>) -> Result<Self>
    where
        K: AsRef<str>,
        L: Into<String>,
    {
        for (key, label) in entries {
            self.insert(key.as_ref(), label.into())?;
        }
        Ok(self)
    }

    fn insert(&mut self, key: &str, label: String) -> Result<()> {
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(DomainError::ValidationError(
                "media type key cannot be empty".to_string(),
            ));
        }
        if self.contains(&key) {
            return Err(DomainError::DuplicateMediaType(key));
        }
        self.entries.push((key, label));
        Ok(())
    }

    /// Whether `key` (already lowercase) is a supported media type
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Display label for a media type key
    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// Resolve user input to a supported key (case-insensitive)
    pub fn resolve(&self, input: &str) -> Result<&str> {
        let wanted = input.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == wanted)
            .map(|(k, _)| k.as_str())
            .ok_or_else(|| DomainError::UnsupportedMediaType(input.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MediaTypeWhitelist {
    fn default() -> Self {
        Self {
            entries: DEFAULT_MEDIA_TYPES
                .iter()
                .map(|(k, l)| (k.to_string(), l.to_string()))
                .collect(),
        }
    }
}

/// Displayable join status for one media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantMediaTypeRow {
    pub media_type: String,
    pub join_status: bool,
}

impl RelevantMediaTypeRow {
    pub fn new(media_type: impl Into<String>, join_status: bool) -> Self {
        Self {
            media_type: media_type.into(),
            join_status,
        }
    }
}
