//! Character-level Unicode classification for Devanagari text.

/// Virama (halant), the sign that suppresses a consonant's inherent vowel.
pub const VIRAMA: char = '\u{094D}';

const OM: char = '\u{0950}';

/// Check the full Devanagari block (U+0900..U+097F).
pub fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

pub fn is_consonant(c: char) -> bool {
    ('\u{0915}'..='\u{0939}').contains(&c)
}

/// Independent (word-initial) vowel letters, as opposed to the
/// dependent vowel signs that attach to a consonant.
pub fn is_independent_vowel(c: char) -> bool {
    ('\u{0904}'..='\u{0914}').contains(&c)
}

/// Validate a candidate dictionary word.
///
/// A word is accepted when it has at least two codepoints, lies entirely
/// in the Devanagari block, does not end with a virama, starts with a
/// consonant, independent vowel, or Om, and carries no independent vowel
/// after the first position (those only occur word-initially).
pub fn is_valid_word(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if chars.next().is_none() {
        return false;
    }
    if !word.chars().all(is_devanagari) {
        return false;
    }
    if word.ends_with(VIRAMA) {
        return false;
    }
    if !(is_consonant(first) || is_independent_vowel(first) || first == OM) {
        return false;
    }
    word.chars().skip(1).all(|c| !is_independent_vowel(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_words() {
        assert!(is_valid_word("नेपाल"));
        assert!(is_valid_word("घर"));
        assert!(is_valid_word("कि"));
        assert!(is_valid_word("ॐकार"));
        assert!(is_valid_word("आमा"));
    }

    #[test]
    fn test_too_short() {
        assert!(!is_valid_word(""));
        assert!(!is_valid_word("क"));
    }

    #[test]
    fn test_trailing_virama_rejected() {
        assert!(!is_valid_word("नेपाल्"));
        assert!(!is_valid_word("क्"));
    }

    #[test]
    fn test_non_devanagari_rejected() {
        assert!(!is_valid_word("ghar"));
        assert!(!is_valid_word("घरx"));
    }

    #[test]
    fn test_bad_first_char() {
        // Dependent vowel sign cannot open a word.
        assert!(!is_valid_word("ाक"));
    }

    #[test]
    fn test_internal_independent_vowel_rejected() {
        assert!(!is_valid_word("अआ"));
        assert!(!is_valid_word("कअम"));
    }
}
