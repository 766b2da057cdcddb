//! Latin-to-Devanagari mapping table.
//!
//! Two sections feed the table: `[charMap]` entries go in directly, and
//! each `[consonantMap]` base consonant is expanded into its full,
//! matra-suffixed, and virama-terminated forms. Explicit entries always
//! win over derived ones, so re-loading identical content reproduces an
//! identical table.

mod parser;

pub(crate) use parser::parse_sections;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::unicode::VIRAMA;

/// Default mapping shipped with the engine.
pub const DEFAULT_MAPPING_TOML: &str = include_str!("default_mapping.toml");

/// Vowel-sign suffixes derived for every consonant base.
const MATRA_SUFFIXES: [(&str, char); 9] = [
    ("i", '\u{093F}'),
    ("ee", '\u{0940}'),
    ("u", '\u{0941}'),
    ("oo", '\u{0942}'),
    ("rri", '\u{0943}'),
    ("e", '\u{0947}'),
    ("ai", '\u{0948}'),
    ("o", '\u{094B}'),
    ("au", '\u{094C}'),
];

/// Sign for the explicit long-a form (base + "a").
const AA_SIGN: char = '\u{093E}';

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingTable {
    map: HashMap<String, String>,
    max_key_chars: usize,
}

impl MappingTable {
    /// Build a table from configuration text. Never fails: malformed
    /// lines are skipped and unknown sections ignored.
    pub fn parse(text: &str) -> Self {
        let mut table = MappingTable::default();
        let mut consonants: Vec<(String, String)> = Vec::new();

        for section in parse_sections(text) {
            match section.name.as_str() {
                "charMap" => {
                    for (key, value) in section.entries {
                        table.insert(key, value);
                    }
                }
                "consonantMap" => consonants.extend(section.entries),
                _ => {}
            }
        }

        for (base, grapheme) in consonants {
            table.derive_consonant(&base, &grapheme);
        }
        debug!(entries = table.len(), "mapping table built");
        table
    }

    /// Load a mapping file. A missing or unreadable file yields an empty
    /// table so the engine still runs as a passthrough.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "mapping file not loaded, using empty table");
                MappingTable::default()
            }
        }
    }

    /// The embedded default table.
    pub fn default_table() -> Self {
        Self::parse(DEFAULT_MAPPING_TOML)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate all (key, value) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Longest key length in characters, used to bound the greedy matcher.
    pub(crate) fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }

    fn insert(&mut self, key: String, value: String) {
        self.max_key_chars = self.max_key_chars.max(key.chars().count());
        self.map.insert(key, value);
    }

    fn insert_derived(&mut self, key: String, value: String) {
        if !self.map.contains_key(&key) {
            self.insert(key, value);
        }
    }

    /// Expand one consonant base (`ka` → क) into all of its forms.
    fn derive_consonant(&mut self, base: &str, grapheme: &str) {
        let stem = match base.strip_suffix('a') {
            Some(stem) if !stem.is_empty() => stem,
            _ => base,
        };
        self.insert_derived(base.to_string(), grapheme.to_string());
        self.insert_derived(format!("{base}a"), format!("{grapheme}{AA_SIGN}"));
        for (suffix, sign) in MATRA_SUFFIXES {
            self.insert_derived(format!("{stem}{suffix}"), format!("{grapheme}{sign}"));
        }
        self.insert_derived(stem.to_string(), format!("{grapheme}{VIRAMA}"));
    }
}
