//! The transliteration engine.
//!
//! `Transliterator` owns an immutable mapping table, an override table
//! and a set of option flags; `transliterate` is synchronous, total and
//! side-effect free, so a shared instance can serve concurrent callers.

mod rules;
#[cfg(test)]
mod tests;

use serde::Deserialize;
use tracing::{debug, debug_span};

use crate::mapping::MappingTable;
use crate::overrides::OverrideTable;
use crate::unicode::VIRAMA;

use rules::ANUSVARA_MARKER;

/// Engine option flags. Read at the start of every `transliterate`
/// call; changing them between calls is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslitOptions {
    /// Phonetic rule pipeline (word-ending and nasal rewrites).
    pub smart_correction: bool,
    /// Whole-word override lookup.
    pub auto_correct: bool,
    /// Transliterate ASCII digits to Devanagari numerals.
    pub indic_numbers: bool,
    /// Transliterate punctuation and symbols present in the table.
    pub symbols: bool,
    /// Anusvara assimilation stage of the rule pipeline (experimental).
    pub anusvara_assimilation: bool,
}

impl Default for TranslitOptions {
    fn default() -> Self {
        TranslitOptions {
            smart_correction: true,
            auto_correct: true,
            indic_numbers: true,
            symbols: true,
            anusvara_assimilation: false,
        }
    }
}

pub struct Transliterator {
    mapping: MappingTable,
    overrides: OverrideTable,
    options: TranslitOptions,
}

impl Transliterator {
    pub fn new(mapping: MappingTable, overrides: OverrideTable, options: TranslitOptions) -> Self {
        Transliterator {
            mapping,
            overrides,
            options,
        }
    }

    /// Engine with the embedded default tables and default options.
    pub fn with_defaults() -> Self {
        Self::new(
            MappingTable::default_table(),
            OverrideTable::default_table(),
            TranslitOptions::default(),
        )
    }

    pub fn options(&self) -> TranslitOptions {
        self.options
    }

    pub fn set_options(&mut self, options: TranslitOptions) {
        self.options = options;
    }

    pub fn mapping(&self) -> &MappingTable {
        &self.mapping
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Transliterate a whole input string. Total for any input; empty
    /// input yields an empty string.
    pub fn transliterate(&self, input: &str) -> String {
        let span = debug_span!("transliterate", chars = input.chars().count());
        let _enter = span.enter();

        let spaced = self.space_punctuation(input);
        let (masked, literals) = mask_literals(&spaced);

        let mut result = String::new();
        let mut first = true;
        for token in masked.split(' ') {
            if token.is_empty() {
                continue;
            }
            if !first {
                result.push(' ');
            }
            result.push_str(&self.render_token(token));
            first = false;
        }

        // Masks went through the matcher like any other token, so locate
        // their transliterated form and put the original text back.
        for (mask, original) in &literals {
            let rendered = self.transliterate_segment(mask);
            result = result.replace(&rendered, original);
        }
        debug!(literals = literals.len(), out_chars = result.chars().count());
        result
    }

    /// Insert a space before `.`, `?` and single-character mapping keys
    /// so punctuation becomes its own token. The anusvara marker and
    /// the virama escape stay attached to their token.
    fn space_punctuation(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 8);
        let mut prev: Option<char> = None;
        let mut buf = [0u8; 4];
        for c in input.chars() {
            if c == ANUSVARA_MARKER || c == '\\' {
                out.push(c);
                prev = Some(c);
                continue;
            }
            let breaks =
                c == '.' || c == '?' || self.mapping.contains_key(c.encode_utf8(&mut buf));
            if prev.is_some() && breaks && !c.is_alphanumeric() && prev != Some(' ') {
                out.push(' ');
            }
            out.push(c);
            prev = Some(c);
        }
        out
    }

    fn render_token(&self, token: &str) -> String {
        let mut it = token.chars();
        let single = match (it.next(), it.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };
        if let Some(c) = single {
            if c.is_ascii_digit() && !self.options.indic_numbers {
                return token.to_string();
            }
            if !c.is_alphanumeric() && !self.options.symbols {
                return token.to_string();
            }
            if let Some(value) = self.mapping.get(token) {
                return value.to_string();
            }
        }
        let cleaned = self.preprocess_token(token);
        self.transliterate_segment(&cleaned)
    }

    /// Override lookup short-circuits the rule pipeline.
    fn preprocess_token(&self, token: &str) -> String {
        if self.options.auto_correct {
            if let Some(replacement) = self.overrides.get(token) {
                return replacement.to_string();
            }
        }
        if self.options.smart_correction {
            return rules::apply_smart_correction(token, self.options.anusvara_assimilation);
        }
        token.to_string()
    }

    /// Greedy longest-match substitution over `/`-separated sub-segments.
    ///
    /// A trailing `\` on a sub-segment is consumed and forces retention
    /// of an otherwise-elided trailing virama.
    fn transliterate_segment(&self, segment: &str) -> String {
        let mut result = String::new();
        for sub in segment.split('/') {
            if sub.is_empty() {
                continue;
            }
            let forced_virama = sub.ends_with('\\');
            let body: Vec<char> = if forced_virama {
                sub[..sub.len() - 1].chars().collect()
            } else {
                sub.chars().collect()
            };

            let mut out = String::new();
            let mut pos = 0;
            while pos < body.len() {
                let (piece, consumed) = self.match_at(&body[pos..]);
                out.push_str(&piece);
                pos += consumed;
            }

            // The inherent-vowel default: a trailing virama is implicit
            // unless the user escaped for it.
            if !forced_virama && body.len() > 1 && out.ends_with(VIRAMA) {
                out.pop();
            }
            result.push_str(&out);
        }
        result
    }

    /// Longest mapping-table hit at the head of `rem`, falling back to
    /// raw single-character passthrough. Digit and symbol passthrough
    /// flags are honored at the single-character level.
    fn match_at(&self, rem: &[char]) -> (String, usize) {
        let longest = self.mapping.max_key_chars().clamp(1, rem.len());
        for len in (1..=longest).rev() {
            if len == 1 {
                let c = rem[0];
                if c.is_ascii_digit() && !self.options.indic_numbers {
                    return (c.to_string(), 1);
                }
                if !c.is_alphanumeric() && !self.options.symbols {
                    return (c.to_string(), 1);
                }
            }
            let key: String = rem[..len].iter().collect();
            if let Some(value) = self.mapping.get(&key) {
                return (value.to_string(), len);
            }
        }
        (rem[0].to_string(), 1)
    }
}

/// Replace every `{...}` span with a positional mask `$-N-$`, returning
/// the masked text plus (mask, literal) pairs for restoration. An
/// unterminated `{` extends to the end of the input.
fn mask_literals(input: &str) -> (String, Vec<(String, String)>) {
    let mut processed = input.to_string();
    let mut literals = Vec::new();
    let mut count = 1usize;
    let mut from = 0usize;

    while let Some(rel) = processed[from..].find('{') {
        let open = from + rel;
        let end = match processed[open + 1..].find('}') {
            Some(rel_close) => open + 1 + rel_close + 1,
            None => processed.len(),
        };
        let literal = processed[open + 1..end]
            .strip_suffix('}')
            .unwrap_or(&processed[open + 1..end])
            .to_string();
        let mask = format!("$-{count}-$");
        count += 1;
        processed.replace_range(open..end, &mask);
        from = open + mask.len();
        literals.push((mask, literal));
    }
    (processed, literals)
}
