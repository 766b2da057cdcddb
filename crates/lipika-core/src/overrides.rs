//! Whole-word override table (dictionary-style autocorrect).
//!
//! A matched word bypasses both the phonetic rule pipeline and
//! character-level matching; the stored replacement is used verbatim.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::mapping::parse_sections;

/// Default override list shipped with the engine.
pub const DEFAULT_AUTOCORRECT_TOML: &str = include_str!("default_autocorrect.toml");

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideTable {
    words: HashMap<String, String>,
}

impl OverrideTable {
    /// Build a table from configuration text. Only the `specialWords`
    /// section is consulted; malformed lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut words = HashMap::new();
        for section in parse_sections(text) {
            if section.name != "specialWords" {
                continue;
            }
            for (key, value) in section.entries {
                words.insert(key, value);
            }
        }
        debug!(entries = words.len(), "override table built");
        OverrideTable { words }
    }

    /// Load an override file. A missing or unreadable file yields an
    /// empty table.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "override file not loaded, using empty table");
                OverrideTable::default()
            }
        }
    }

    /// The embedded default table.
    pub fn default_table() -> Self {
        Self::parse(DEFAULT_AUTOCORRECT_TOML)
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate all (word, replacement) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_special_words_section_is_read() {
        let text = "[other]\nx = \"y\"\n[specialWords]\nnepal = \"नेपाल\"\n";
        let table = OverrideTable::parse(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("nepal"), Some("नेपाल"));
        assert_eq!(table.get("x"), None);
    }

    #[test]
    fn default_table_loads() {
        let table = OverrideTable::default_table();
        assert!(!table.is_empty());
        assert_eq!(table.get("nepal"), Some("नेपाल"));
    }

    #[test]
    fn missing_file_yields_empty_table() {
        let table = OverrideTable::load(Path::new("/nonexistent/autocorrect.toml"));
        assert!(table.is_empty());
    }
}
