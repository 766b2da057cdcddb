//! Romanized-Nepali to Devanagari transliteration engine with a
//! persistent, frequency-ranked word store.
//!
//! The engine is a multi-stage text transducer: punctuation spacing,
//! literal-span masking, per-token phonetic correction, and greedy
//! longest-match substitution against a loadable mapping table. The
//! store is a SQLite-backed word/frequency table used for suggestion
//! ranking and incremental learning from imported text.

pub mod engine;
pub mod learn;
pub mod mapping;
pub mod overrides;
pub mod settings;
pub mod store;
pub mod unicode;

pub use engine::{TranslitOptions, Transliterator};
pub use learn::{LearnError, LearnSummary};
pub use mapping::MappingTable;
pub use overrides::OverrideTable;
pub use settings::{Settings, SettingsError};
pub use store::{SortColumn, StoreError, WordStore};
