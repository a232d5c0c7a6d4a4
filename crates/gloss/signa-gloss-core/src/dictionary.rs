//! Gloss dictionary: upper-case word → animation resource identifier.
//!
//! Loaded once (usually from a JSON object) and read-only afterwards. Keys are
//! normalized to upper case on load and on every lookup.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;
use crate::token::Token;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, String>", into = "IndexMap<String, String>")]
pub struct Dictionary {
    entries: IndexMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(word, resource)` pairs. Keys are upper-cased; entries whose
    /// key is not a valid gloss or whose resource is empty are dropped.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut out = IndexMap::new();
        for (k, v) in entries {
            let key = k.as_ref().trim().to_uppercase();
            let resource: String = v.into();
            if Token::new(key.as_str()).is_err() {
                log::warn!("dropping dictionary entry with invalid key {:?}", k.as_ref());
                continue;
            }
            if resource.trim().is_empty() {
                log::warn!("dropping dictionary entry {key} with empty resource");
                continue;
            }
            out.insert(key, resource);
        }
        Self { entries: out }
    }

    pub fn from_json_str(s: &str) -> Result<Self, DictionaryError> {
        let raw: IndexMap<String, String> = serde_json::from_str(s)?;
        Ok(Self::from_entries(raw))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Whether `word` (any case) has a whole-word sign.
    pub fn contains(&self, word: &str) -> bool {
        self.resource_for(word).is_some()
    }

    /// Resource identifier for `word` (any case).
    pub fn resource_for(&self, word: &str) -> Option<&str> {
        match self.entries.get(word) {
            Some(r) => Some(r.as_str()),
            None => self.entries.get(&word.to_uppercase()).map(String::as_str),
        }
    }

    /// All dictionary words in load order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, String>> for Dictionary {
    fn from(raw: IndexMap<String, String>) -> Self {
        Self::from_entries(raw)
    }
}

impl From<Dictionary> for IndexMap<String, String> {
    fn from(dict: Dictionary) -> Self {
        dict.entries
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
