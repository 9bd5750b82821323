//! Configuration
//!
//! Resolved runtime configuration. Built once from the settings store and
//! handed to the registry, sync engine and launcher; nothing reads settings
//! through global state.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{McmdError, Result};
use crate::settings::{self, SettingsStore};

/// Subdirectory used under export/import roots
pub const EXPORT_SUBDIR: &str = "mcmd";

/// Editor used when nothing else is configured
pub const FALLBACK_EDITOR: &str = "vi";

/// Default home directory name under the user's home
pub const DEFAULT_HOME_DIR: &str = ".mcmd_commands";

/// Main mcmd configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Home directory holding `settings.json`
    pub home: PathBuf,
    /// Settings file path
    pub settings_path: PathBuf,
    /// Registry root: one subdirectory per command
    pub commands_dir: PathBuf,
    /// Export after every successful create/update
    pub auto_export: bool,
    /// Default export/import directory
    pub export_dir: Option<PathBuf>,
    /// Editor command for writing scripts
    pub editor: String,
    /// Fixed subdirectory name under export/import roots
    pub export_subdir: String,
}

impl Config {
    /// Configuration rooted at `home` with built-in defaults
    ///
    /// Used by tests and by `init` before a settings file exists.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            settings_path: home.join(settings::SETTINGS_FILE),
            commands_dir: home.clone(),
            home,
            auto_export: false,
            export_dir: None,
            editor: default_editor(),
            export_subdir: EXPORT_SUBDIR.to_string(),
        }
    }

    /// Load configuration from `<home>/settings.json`
    ///
    /// Fails when the settings file is missing or malformed. Individual
    /// settings that are absent fall back to defaults.
    pub fn load(home: &Path) -> Result<Self> {
        let store = SettingsStore::in_dir(home);
        // Fail fast on a missing or undecodable document
        store.get_all()?;

        let mut config = Self::with_home(home);

        if let Some(dir) = optional_string(&store, settings::COMMANDS_DIR_KEY)? {
            config.commands_dir = expand_tilde(&dir);
        }
        config.auto_export = match store.get_bool(settings::AUTO_EXPORT_KEY) {
            Ok(flag) => flag,
            Err(McmdError::SettingNotFound(_)) => false,
            Err(e) => return Err(e),
        };
        config.export_dir = optional_string(&store, settings::EXPORT_DIR_KEY)?.map(|d| expand_tilde(&d));
        if let Some(editor) = optional_string(&store, settings::EDITOR_KEY)? {
            config.editor = editor;
        }

        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    pub fn settings(&self) -> SettingsStore {
        SettingsStore::new(&self.settings_path)
    }
}

/// Default home directory: `~/.mcmd_commands`
pub fn default_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_HOME_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HOME_DIR))
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn default_editor() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
}

/// A non-empty string setting, or `None` when absent or blank
fn optional_string(store: &SettingsStore, key: &str) -> Result<Option<String>> {
    match store.get_string(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(McmdError::SettingNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
