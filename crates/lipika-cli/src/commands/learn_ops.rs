use std::path::Path;
use std::process;
use std::sync::atomic::AtomicBool;

use lipika_core::learn::learn_from_file;
use lipika_core::WordStore;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn learn_cmd(store_path: &Path, input_file: &str, chunk_size: usize) {
    let mut store = die!(WordStore::open(store_path), "Error opening word store: {}");
    let cancel = AtomicBool::new(false);
    let summary = die!(
        learn_from_file(&mut store, Path::new(input_file), chunk_size, &cancel),
        "Error learning from file: {}"
    );
    println!(
        "{} chunks, {} candidates, {} words learned",
        summary.chunks, summary.candidates, summary.learned
    );
    let total = die!(store.word_count(), "Error counting words: {}");
    println!("{total} words in store");
}
