use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use lipika_cli::commands::{convert_ops, default_store_path, dict_ops, learn_ops};
use lipika_core::{Settings, SortColumn};

#[derive(Parser)]
#[command(name = "liptool", about = "Lipika transliteration and word store tool")]
struct Cli {
    /// Word store database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Word,
    Frequency,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text (or stdin when no text is given)
    Convert {
        /// Text to transliterate
        text: Option<String>,
        /// Mapping table file (default: embedded table)
        #[arg(long)]
        mapping: Option<String>,
        /// Autocorrect word list file (default: embedded list)
        #[arg(long)]
        autocorrect: Option<String>,
        /// Settings file (default: ~/.config/lipika/settings.toml)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Disable the phonetic correction rules
        #[arg(long)]
        no_smart: bool,
        /// Disable whole-word autocorrect
        #[arg(long)]
        no_autocorrect: bool,
        /// Keep ASCII digits instead of Devanagari numerals
        #[arg(long)]
        no_indic_numbers: bool,
        /// Keep punctuation and symbols untransliterated
        #[arg(long)]
        no_symbols: bool,
        /// Enable the experimental anusvara stage
        #[arg(long)]
        anusvara: bool,
    },
    /// Learn words from a Devanagari text file
    Learn {
        /// Input text file
        input_file: String,
        /// Settings file (default: ~/.config/lipika/settings.toml)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Add a word (or bump its frequency)
    Add {
        /// Word to add
        word: String,
    },
    /// Remove a word
    Remove {
        /// Word to remove
        word: String,
    },
    /// Show or set a word's frequency
    Freq {
        /// Word to inspect
        word: String,
        /// New frequency value
        #[arg(long)]
        set: Option<i64>,
    },
    /// List stored words
    List {
        /// Maximum words to show (0 = all)
        #[arg(short, long, default_value = "50")]
        limit: i64,
        /// Words to skip
        #[arg(long, default_value = "0")]
        offset: i64,
        /// Sort column
        #[arg(long, value_enum, default_value = "frequency")]
        sort: SortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },
    /// Search words by substring
    Search {
        /// Substring to look for
        term: String,
    },
    /// Suggest completions for a prefix
    Suggest {
        /// Word prefix
        prefix: String,
        /// Maximum suggestions
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show store metadata
    Info,
    /// Delete every stored word
    Reset {
        /// Required confirmation flag
        #[arg(long)]
        i_am_sure: bool,
    },
}

fn default_settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".config/lipika/settings.toml")
}

fn load_settings(path: Option<PathBuf>) -> Settings {
    let path = path.unwrap_or_else(default_settings_path);
    Settings::load(&path).unwrap_or_else(|e| {
        eprintln!("Error loading settings: {e}");
        process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let db = cli.db.unwrap_or_else(default_store_path);

    match cli.command {
        Command::Convert {
            text,
            mapping,
            autocorrect,
            settings,
            no_smart,
            no_autocorrect,
            no_indic_numbers,
            no_symbols,
            anusvara,
        } => {
            let settings = load_settings(settings);
            let mut options = settings.engine;
            options.smart_correction &= !no_smart;
            options.auto_correct &= !no_autocorrect;
            options.indic_numbers &= !no_indic_numbers;
            options.symbols &= !no_symbols;
            options.anusvara_assimilation |= anusvara;

            let engine = convert_ops::build_engine(mapping.as_deref(), autocorrect.as_deref(), options);
            convert_ops::convert_cmd(&engine, text.as_deref());
        }
        Command::Learn {
            input_file,
            settings,
        } => {
            let settings = load_settings(settings);
            learn_ops::learn_cmd(&db, &input_file, settings.learn.chunk_size_bytes());
        }
        Command::Add { word } => dict_ops::add_cmd(&db, &word),
        Command::Remove { word } => dict_ops::remove_cmd(&db, &word),
        Command::Freq { word, set } => dict_ops::frequency_cmd(&db, &word, set),
        Command::List {
            limit,
            offset,
            sort,
            ascending,
        } => {
            let sort = match sort {
                SortKey::Word => SortColumn::Word,
                SortKey::Frequency => SortColumn::Frequency,
            };
            dict_ops::list_cmd(&db, limit, offset, sort, ascending);
        }
        Command::Search { term } => dict_ops::search_cmd(&db, &term),
        Command::Suggest { prefix, limit } => dict_ops::suggest_cmd(&db, &prefix, limit),
        Command::Info => dict_ops::info_cmd(&db),
        Command::Reset { i_am_sure } => dict_ops::reset_cmd(&db, i_am_sure),
    }
}
