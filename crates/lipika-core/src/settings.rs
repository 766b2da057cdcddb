//! User-tunable settings, deserialized from a TOML file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::engine::TranslitOptions;

/// Settings shipped with the engine.
pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LearnSettings {
    /// Import chunk size in megabytes. Must be at least 1.
    pub chunk_size_mb: usize,
}

impl Default for LearnSettings {
    fn default() -> Self {
        LearnSettings { chunk_size_mb: 15 }
    }
}

impl LearnSettings {
    pub fn chunk_size_bytes(&self) -> usize {
        self.chunk_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: TranslitOptions,
    pub learn: LearnSettings,
}

impl Settings {
    /// Parse settings text. Unknown keys are ignored; out-of-range
    /// values are rejected.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        if settings.learn.chunk_size_mb == 0 {
            return Err(SettingsError::InvalidValue(
                "learn.chunk_size_mb must be at least 1".to_string(),
            ));
        }
        Ok(settings)
    }

    /// Load a settings file, or the embedded defaults when the file does
    /// not exist. Other read failures are errors.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "settings loaded");
                Self::parse(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let parsed = Settings::parse(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let settings = Settings::parse("[engine]\nsmart_correction = false\n").unwrap();
        assert!(!settings.engine.smart_correction);
        assert!(settings.engine.auto_correct);
        assert_eq!(settings.learn.chunk_size_mb, 15);
    }

    #[test]
    fn test_chunk_size_bytes() {
        let settings = Settings::parse("[learn]\nchunk_size_mb = 2\n").unwrap();
        assert_eq!(settings.learn.chunk_size_bytes(), 2 * 1024 * 1024);
        assert_eq!(
            Settings::default().learn.chunk_size_bytes(),
            crate::learn::DEFAULT_CHUNK_SIZE
        );
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let err = Settings::parse("[learn]\nchunk_size_mb = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(Settings::parse("not toml [").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
