use std::path::Path;
use std::process;

use lipika_core::store::ABSENT;
use lipika_core::{SortColumn, WordStore};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn open_store(path: &Path) -> WordStore {
    die!(WordStore::open(path), "Error opening word store: {}")
}

pub fn add_cmd(path: &Path, word: &str) {
    let store = open_store(path);
    die!(store.add_word(word), "Error adding word: {}");
    let freq = die!(store.word_frequency(word), "Error reading frequency: {}");
    println!("{word}\t{freq}");
}

pub fn remove_cmd(path: &Path, word: &str) {
    let store = open_store(path);
    let known = die!(store.word_frequency(word), "Error reading frequency: {}");
    if known == ABSENT {
        println!("Not found: {word}");
        return;
    }
    die!(store.remove_word(word), "Error removing word: {}");
    println!("Removed: {word}");
}

pub fn frequency_cmd(path: &Path, word: &str, set: Option<i64>) {
    let store = open_store(path);
    if let Some(frequency) = set {
        let changed = die!(
            store.update_frequency(word, frequency),
            "Error updating frequency: {}"
        );
        if !changed {
            println!("Not found: {word}");
            return;
        }
    }
    let freq = die!(store.word_frequency(word), "Error reading frequency: {}");
    if freq == ABSENT {
        println!("Not found: {word}");
    } else {
        println!("{word}\t{freq}");
    }
}

pub fn list_cmd(path: &Path, limit: i64, offset: i64, sort: SortColumn, ascending: bool) {
    let store = open_store(path);
    let words = die!(
        store.all_words(limit, offset, sort, ascending),
        "Error listing words: {}"
    );
    if words.is_empty() {
        println!("(empty)");
        return;
    }
    for (word, freq) in &words {
        println!("{word}\t{freq}");
    }
    println!("---");
    println!("{} words", words.len());
}

pub fn search_cmd(path: &Path, term: &str) {
    let store = open_store(path);
    let words = die!(store.search_words(term), "Error searching words: {}");
    if words.is_empty() {
        println!("(no matches)");
        return;
    }
    for (word, freq) in &words {
        println!("{word}\t{freq}");
    }
}

pub fn suggest_cmd(path: &Path, prefix: &str, limit: usize) {
    let store = open_store(path);
    let words = die!(store.find_words(prefix, limit), "Error finding words: {}");
    for word in &words {
        println!("{word}");
    }
}

pub fn info_cmd(path: &Path) {
    let store = open_store(path);
    let info = die!(store.info(), "Error reading store info: {}");
    for (key, value) in &info {
        println!("{key}: {value}");
    }
}

pub fn reset_cmd(path: &Path, confirmed: bool) {
    if !confirmed {
        eprintln!("Refusing to delete all words without --i-am-sure");
        process::exit(1);
    }
    let store = open_store(path);
    die!(store.reset(), "Error resetting store: {}");
    println!("Word store cleared");
}
