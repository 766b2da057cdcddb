//! Line-oriented `[section]` / `key = "value"` parser.
//!
//! Deliberately more forgiving than a TOML parser: unparseable lines are
//! skipped so a partially broken mapping file still loads everything else.

use tracing::trace;

/// One `[name]` block with its entries in file order.
pub(crate) struct Section {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

/// Parse configuration text into an ordered list of sections.
///
/// `#` starts a line or trailing comment. Keys and values may be quoted
/// with `"` or `'`; quoted text recognizes the escapes `\\`, `\n` and
/// `\t`, and keeps the escaped character for anything else. Entries that
/// appear before the first section header land in a section named `""`.
pub(crate) fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current = Section {
        name: String::new(),
        entries: Vec::new(),
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            sections.push(std::mem::replace(
                &mut current,
                Section {
                    name: line[1..line.len() - 1].to_string(),
                    entries: Vec::new(),
                },
            ));
            continue;
        }
        let Some(eq) = line.find('=') else {
            trace!(line, "skipping line without '='");
            continue;
        };
        let key = unquote(line[..eq].trim());
        let mut value = &line[eq + 1..];
        if let Some(comment) = value.find('#') {
            value = &value[..comment];
        }
        let value = unquote(value.trim());
        if key.is_empty() {
            trace!(line, "skipping entry with empty key");
            continue;
        }
        current.entries.push((key, value));
    }
    sections.push(current);
    sections
}

fn unquote(raw: &str) -> String {
    let inner = if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('\'') && raw.ends_with('\'')))
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            // Trailing lone backslash stays literal.
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_and_entries() {
        let text = "
# header comment
[one]
a = \"x\"
b = y
[two]
c = \"z\" # trailing comment
";
        let sections = parse_sections(text);
        let one = sections.iter().find(|s| s.name == "one").unwrap();
        assert_eq!(one.entries, vec![("a".into(), "x".into()), ("b".into(), "y".into())]);
        let two = sections.iter().find(|s| s.name == "two").unwrap();
        assert_eq!(two.entries, vec![("c".into(), "z".into())]);
    }

    #[test]
    fn malformed_lines_skipped() {
        let text = "[s]\nno equals here\n[unclosed\nk = v\n";
        let sections = parse_sections(text);
        let s = sections.iter().find(|s| s.name == "s").unwrap();
        assert_eq!(s.entries, vec![("k".into(), "v".into())]);
    }

    #[test]
    fn escapes() {
        assert_eq!(unquote(r#""a\\b""#), "a\\b");
        assert_eq!(unquote(r#""a\nb""#), "a\nb");
        assert_eq!(unquote(r#""a\tb""#), "a\tb");
        // Unknown escape keeps the escaped character.
        assert_eq!(unquote(r#""a\qb""#), "aqb");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("plain"), "plain");
    }
}
