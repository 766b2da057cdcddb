use std::io::{self, BufRead};
use std::path::Path;

use lipika_core::{MappingTable, OverrideTable, TranslitOptions, Transliterator};

/// Build an engine from optional table files; a missing argument keeps
/// the embedded default table.
pub fn build_engine(
    mapping_file: Option<&str>,
    autocorrect_file: Option<&str>,
    options: TranslitOptions,
) -> Transliterator {
    let mapping = match mapping_file {
        Some(path) => MappingTable::load(Path::new(path)),
        None => MappingTable::default_table(),
    };
    let overrides = match autocorrect_file {
        Some(path) => OverrideTable::load(Path::new(path)),
        None => OverrideTable::default_table(),
    };
    Transliterator::new(mapping, overrides, options)
}

/// Transliterate the argument text, or stdin line by line when no text
/// was given.
pub fn convert_cmd(engine: &Transliterator, text: Option<&str>) {
    match text {
        Some(text) => println!("{}", engine.transliterate(text)),
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                println!("{}", engine.transliterate(&line));
            }
        }
    }
}
