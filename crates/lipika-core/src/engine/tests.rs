use super::*;

fn engine() -> Transliterator {
    Transliterator::with_defaults()
}

fn engine_with(adjust: impl FnOnce(&mut TranslitOptions)) -> Transliterator {
    let mut t = Transliterator::with_defaults();
    let mut options = t.options();
    adjust(&mut options);
    t.set_options(options);
    t
}

#[test]
fn test_namaste_golden() {
    assert_eq!(engine().transliterate("namaste"), "नमस्ते");
}

#[test]
fn test_empty_input() {
    assert_eq!(engine().transliterate(""), "");
}

#[test]
fn test_trailing_virama_suppressed() {
    // "r" alone maps to the virama form; the suppression step drops it.
    assert_eq!(engine().transliterate("ghar"), "घर");
}

#[test]
fn test_final_vowel_rule() {
    assert_eq!(engine().transliterate("ghara"), "घरा");
    let plain = engine_with(|o| o.smart_correction = false);
    assert_eq!(plain.transliterate("ghara"), "घर");
}

#[test]
fn test_forced_virama_escape() {
    let t = engine();
    assert_eq!(t.transliterate("sak"), "सक");
    assert_eq!(t.transliterate("sak\\"), "सक्");
}

#[test]
fn test_single_char_token_keeps_virama() {
    assert_eq!(engine().transliterate("k"), "क्");
}

#[test]
fn test_interior_backslash_is_consumed() {
    // Only a trailing backslash escapes the virama; elsewhere the
    // escape maps to nothing and never splits its token.
    assert_eq!(engine().transliterate("sa\\k"), "सक");
    assert_eq!(engine().transliterate("ghar\\ ghar"), "घर् घर");
}

#[test]
fn test_slash_starts_new_match_run() {
    let t = engine();
    assert_eq!(t.transliterate("pau"), "पौ");
    assert_eq!(t.transliterate("pa/u"), "पउ");
}

#[test]
fn test_literal_span_preserved() {
    let out = engine().transliterate("namaste {HELLO} namaste");
    assert_eq!(out, "नमस्ते HELLO नमस्ते");
}

#[test]
fn test_multiple_literal_spans() {
    let out = engine().transliterate("{a} ra {b}");
    assert_eq!(out, "a र b");
}

#[test]
fn test_unterminated_literal_extends_to_end() {
    assert_eq!(engine().transliterate("ghar {abc"), "घर abc");
}

#[test]
fn test_digits_follow_indic_flag() {
    assert_eq!(engine().transliterate("5"), "५");
    let plain = engine_with(|o| o.indic_numbers = false);
    assert_eq!(plain.transliterate("5"), "5");
    // Inside a token the digit passes through; the virama before it is
    // not trailing, so it stays.
    assert_eq!(plain.transliterate("ghar5"), "घर्5");
}

#[test]
fn test_symbols_follow_symbol_flag() {
    assert_eq!(engine().transliterate("."), "।");
    let plain = engine_with(|o| o.symbols = false);
    assert_eq!(plain.transliterate("."), ".");
}

#[test]
fn test_punctuation_gets_spaced() {
    assert_eq!(engine().transliterate("ghar."), "घर ।");
}

#[test]
fn test_override_applies() {
    assert_eq!(engine().transliterate("nepal"), "नेपाल");
    let plain = engine_with(|o| o.auto_correct = false);
    assert_eq!(plain.transliterate("nepal"), "नेपल");
}

#[test]
fn test_override_short_circuits_rules() {
    // The rule pipeline would rewrite "pani" to "panee"; the override wins.
    assert_eq!(engine().transliterate("pani"), "पनि");
}

#[test]
fn test_every_override_word_roundtrips() {
    let t = engine();
    for (word, replacement) in t.overrides().iter() {
        assert_eq!(
            t.transliterate(word),
            replacement,
            "override mismatch for {word}"
        );
    }
}

#[test]
fn test_every_single_char_key_maps_when_flags_on() {
    let t = engine();
    for (key, value) in t.mapping().iter() {
        if key.chars().count() != 1 {
            continue;
        }
        assert_eq!(t.transliterate(key), value, "mapping mismatch for {key:?}");
    }
}

#[test]
fn test_anusvara_stage() {
    let t = engine_with(|o| o.anusvara_assimilation = true);
    assert_eq!(t.transliterate("samlo"), "संलो");
    // Off by default: the m keeps its halant cluster instead.
    assert_eq!(engine().transliterate("samlo"), "सम्लो");
}

#[test]
fn test_extra_spaces_collapse() {
    assert_eq!(engine().transliterate("ghar  ghar"), "घर घर");
}

#[test]
fn test_empty_mapping_passes_through() {
    let t = Transliterator::new(
        MappingTable::default(),
        OverrideTable::default(),
        TranslitOptions {
            smart_correction: false,
            auto_correct: false,
            ..TranslitOptions::default()
        },
    );
    assert_eq!(t.transliterate("hello"), "hello");
}

#[test]
fn test_unknown_chars_pass_through() {
    assert_eq!(engine().transliterate("xa"), "xअ");
}
