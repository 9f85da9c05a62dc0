//! Application configuration for the demo host.
//!
//! Configuration is read from `~/.cardstack/config.json`, or from the path in
//! `CARDSTACK_CONFIG` when set. A missing file means defaults; command-line
//! flags are applied on top afterwards (see [`crate::cli`]).

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{CardStackError, CardStackResult};
use crate::stack::StackConfig;

/// The config directory name under the home directory.
pub const CONFIG_DIR: &str = ".cardstack";

/// The config file name.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "CARDSTACK_CONFIG";

/// Default number of cards in the demo deck.
pub const DEFAULT_DECK_SIZE: usize = 12;

/// Settings for the demo application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Widget configuration.
    pub stack: StackConfig,
    /// Number of generated cards.
    pub deck_size: usize,
    /// Lift the dragged card into a full-screen overlay layer.
    pub use_overlay: bool,
    /// Deck indices that yield no content, to exercise empty slots.
    pub missing_items: Vec<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stack: StackConfig::default(),
            deck_size: DEFAULT_DECK_SIZE,
            use_overlay: true,
            missing_items: Vec::new(),
        }
    }
}

/// Loads and stores [`AppConfig`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Resolve the config path from `CARDSTACK_CONFIG` or the home directory.
    pub fn new() -> CardStackResult<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(Self::with_path(PathBuf::from(path)));
        }
        let home = dirs::home_dir().ok_or(CardStackError::NoHomeDirectory)?;
        Ok(Self::with_path(home.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Directory holding the config file; log files go next to it.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_path.parent()
    }

    /// Load the configuration.
    ///
    /// A missing file yields defaults. Read and parse failures are errors so
    /// a typo in the file is not silently ignored.
    pub fn load(&self) -> CardStackResult<AppConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let file = File::open(&self.config_path).map_err(|source| CardStackError::ConfigRead {
            path: self.config_path.clone(),
            source,
        })?;
        let config: AppConfig = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            CardStackError::ConfigParse {
                path: self.config_path.clone(),
                source,
            }
        })?;
        tracing::info!(path = %self.config_path.display(), "Loaded config file");
        Ok(config)
    }

    /// Save the configuration, creating the parent directory if needed.
    pub fn save(&self, config: &AppConfig) -> CardStackResult<()> {
        let write_err = |source| CardStackError::ConfigWrite {
            path: self.config_path.clone(),
            source,
        };

        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let file = File::create(&self.config_path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, config).map_err(|e| {
            write_err(std::io::Error::new(std::io::ErrorKind::Other, e))
        })?;
        writer.flush().map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        assert_eq!(manager.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut config = AppConfig::default();
        config.deck_size = 30;
        config.use_overlay = false;
        config.missing_items = vec![2, 5];
        config.stack.max_visible_items = 5;
        config.stack.prevent_y = true;

        manager.save(&config).unwrap();
        assert!(manager.config_path().exists());
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::create_dir_all(manager.config_dir().unwrap()).unwrap();
        fs::write(
            manager.config_path(),
            r#"{ "deck_size": 4, "stack": { "prevent_x": true } }"#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.deck_size, 4);
        assert!(config.stack.prevent_x);
        assert_eq!(config.stack.max_visible_items, 3);
        assert!(config.use_overlay);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::create_dir_all(manager.config_dir().unwrap()).unwrap();
        fs::write(manager.config_path(), "{ deck_size: ").unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, CardStackError::ConfigParse { .. }));
    }

    #[test]
    #[serial]
    fn test_env_var_overrides_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        std::env::set_var(CONFIG_ENV_VAR, &path);
        let manager = ConfigManager::new().unwrap();
        std::env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(manager.config_path(), path.as_path());
    }
}
