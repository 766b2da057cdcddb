pub mod convert_ops;
pub mod dict_ops;
pub mod learn_ops;

/// Default on-disk location of the word store.
pub fn default_store_path() -> std::path::PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    std::path::PathBuf::from(home).join(".local/share/lipika/lipikadict.db")
}
