//! Optional TOML configuration
//!
//! ```toml
//! [game]
//! difficulty = "hard"
//!
//! [store]
//! path = "puzzles/store.json"
//!
//! [share]
//! base_url = "https://puzzles.example.org/"
//! ```
//!
//! Every key is optional. Command-line flags win over the file, and the file
//! wins over the built-in defaults.

use crate::core::DifficultyMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "connections.toml";

/// Store document used when neither flag nor file names one
pub const DEFAULT_STORE_PATH: &str = "connections_store.json";

/// Page that share links point at by default
pub const DEFAULT_SHARE_URL: &str = "http://localhost:8000/index.html";

/// Error type for config files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub game: Option<GameConfig>,
    pub store: Option<StoreConfig>,
    pub share: Option<ShareConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GameConfig {
    pub difficulty: Option<DifficultyMode>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShareConfig {
    pub base_url: Option<String>,
}

impl Config {
    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or is not valid TOML
    /// for this schema.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a config file, treating every failure as "no config"
    ///
    /// A missing file is silent; unreadable or malformed files are logged.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(err) => {
                tracing::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    /// Apply command-line overrides and defaults
    #[must_use]
    pub fn resolve(&self, overrides: Overrides) -> Settings {
        let file_difficulty = self.game.as_ref().and_then(|g| g.difficulty);
        let file_store = self.store.as_ref().and_then(|s| s.path.clone());
        let file_share = self.share.as_ref().and_then(|s| s.base_url.clone());

        Settings {
            difficulty: overrides
                .difficulty
                .or(file_difficulty)
                .unwrap_or_default(),
            store_path: overrides
                .store_path
                .or(file_store)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            share_base_url: file_share.unwrap_or_else(|| DEFAULT_SHARE_URL.to_string()),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub difficulty: Option<DifficultyMode>,
    pub store_path: Option<PathBuf>,
}

/// Effective settings after merging flags, file and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: DifficultyMode,
    pub store_path: PathBuf,
    pub share_base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Difficulty;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = Config::load(Path::new("/no/such/connections.toml"));
        let settings = config.resolve(Overrides::default());

        assert_eq!(settings.difficulty, DifficultyMode::Mixed);
        assert_eq!(settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
        assert_eq!(settings.share_base_url, DEFAULT_SHARE_URL);
    }

    #[test]
    fn file_values_apply() {
        let file = write_config(
            "[game]\ndifficulty = \"expert\"\n[store]\npath = \"s.json\"\n[share]\nbase_url = \"https://x.test/\"\n",
        );
        let settings = Config::load(file.path()).resolve(Overrides::default());

        assert_eq!(settings.difficulty, DifficultyMode::Tier(Difficulty::Expert));
        assert_eq!(settings.store_path, PathBuf::from("s.json"));
        assert_eq!(settings.share_base_url, "https://x.test/");
    }

    #[test]
    fn flags_override_file() {
        let file = write_config("[game]\ndifficulty = \"easy\"\n");
        let settings = Config::load(file.path()).resolve(Overrides {
            difficulty: Some(DifficultyMode::Mixed),
            store_path: Some(PathBuf::from("flag.json")),
        });

        assert_eq!(settings.difficulty, DifficultyMode::Mixed);
        assert_eq!(settings.store_path, PathBuf::from("flag.json"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("[game]\ndifficulty = \"legendary\"\n");
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        let settings = Config::load(file.path()).resolve(Overrides::default());
        assert_eq!(settings.difficulty, DifficultyMode::Mixed);
    }
}
