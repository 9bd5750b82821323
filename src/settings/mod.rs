//! Settings Store
//!
//! Flat key -> `{ value, description }` document persisted as JSON at
//! `<home>/settings.json`. Keys are addressed with dotted paths so nested
//! groups resolve through intermediate objects. The file is re-read on every
//! call; writes rewrite the whole document (last writer wins).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{McmdError, Result};

/// File name of the settings document inside the home directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Directory holding command subdirectories
pub const COMMANDS_DIR_KEY: &str = "MCMD_COMMANDS_DIR";
/// Export after every create/update
pub const AUTO_EXPORT_KEY: &str = "ENABLE_AUTO_EXPORT";
/// Default export/import directory
pub const EXPORT_DIR_KEY: &str = "MCMD_EXPORT_DIR";
/// Editor used for writing scripts
pub const EDITOR_KEY: &str = "MCMD_EDITOR";

const DEFAULT_SETTINGS: &str = include_str!("../../defaults/settings.json");

/// Parsed settings document, in file order
pub type SettingsMap = Map<String, Value>;

/// A single leaf setting flattened for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingEntry {
    /// Dotted key
    pub key: String,
    pub value: String,
    pub description: String,
}

/// Result of seeding a home directory with the built-in defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No settings file existed; the defaults were written
    Created,
    /// An existing file gained these keys from the defaults
    Merged(Vec<String>),
}

/// Built-in default settings
pub fn default_settings() -> Result<SettingsMap> {
    Ok(serde_json::from_str(DEFAULT_SETTINGS)?)
}

/// Handle to a settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `<home>/settings.json`
    pub fn in_dir(home: &Path) -> Self {
        Self::new(home.join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and parse the whole document
    pub fn get_all(&self) -> Result<SettingsMap> {
        load_map(&self.path)
    }

    /// Resolve a dotted key to its `value` field
    pub fn get(&self, key: &str) -> Result<Value> {
        let settings = self.get_all()?;
        resolve_value(&settings, key).cloned()
    }

    /// Value of a setting rendered as a string
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key).map(|v| value_to_string(&v))
    }

    /// Value of a setting interpreted as a flag
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key).map(|v| value_to_bool(&v))
    }

    /// All leaf settings with nested groups flattened to dotted keys
    pub fn list(&self) -> Result<Vec<SettingEntry>> {
        let settings = self.get_all()?;
        let mut entries = Vec::new();
        flatten_into(&settings, "", &mut entries);
        Ok(entries)
    }

    /// Update the `value` field of an existing setting
    ///
    /// Never creates keys. The description is kept as-is. Returns the
    /// previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<String> {
        let mut settings = self.get_all()?;
        let leaf = resolve_node_mut(&mut settings, key)?;
        let leaf = leaf
            .as_object_mut()
            .filter(|node| is_leaf(node))
            .ok_or_else(|| McmdError::InvalidSetting(key.to_string()))?;

        let previous = leaf
            .insert("value".to_string(), Value::String(value.to_string()))
            .map(|v| value_to_string(&v))
            .unwrap_or_default();

        self.save(&settings)?;
        info!("Setting '{}' updated to '{}'", key, value);
        Ok(previous)
    }

    /// Rewrite the whole document
    ///
    /// Written to a sibling temp file first and renamed into place, so a
    /// reader never sees a half-written document.
    pub fn save(&self, settings: &SettingsMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, to_pretty_json(settings)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Wrote {}", self.path.display());
        Ok(())
    }

    /// Write the defaults, or merge new default keys into an existing file
    pub fn seed(&self) -> Result<SeedOutcome> {
        let defaults = default_settings()?;

        if !self.exists() {
            self.save(&defaults)?;
            return Ok(SeedOutcome::Created);
        }

        let mut current = self.get_all()?;
        let added = merge_entries(&mut current, defaults);
        if !added.is_empty() {
            self.save(&current)?;
        }
        Ok(SeedOutcome::Merged(added))
    }
}

/// Add top-level keys present in `new_path` but absent in `old_path`
///
/// A missing old file is treated as empty (first run). A missing new file is
/// an error. Existing keys in the old file are never touched. Returns the
/// keys that were added; the old file is only rewritten when that list is
/// non-empty.
pub fn merge_new_keys(old_path: &Path, new_path: &Path) -> Result<Vec<String>> {
    let old_store = SettingsStore::new(old_path);
    let mut old = match old_store.get_all() {
        Ok(map) => map,
        Err(McmdError::SettingsMissing(path)) => {
            warn!("Old settings file '{}' not found", path.display());
            Map::new()
        }
        Err(e) => return Err(e),
    };

    let new = load_map(new_path)?;
    let added = merge_entries(&mut old, new);
    if added.is_empty() {
        return Ok(added);
    }

    old_store.save(&old)?;
    info!("Settings file '{}' updated with new settings", old_path.display());
    for key in &added {
        info!("Added setting {}", key);
    }
    Ok(added)
}

fn merge_entries(old: &mut SettingsMap, new: SettingsMap) -> Vec<String> {
    let mut added = Vec::new();
    for (key, value) in new {
        if !old.contains_key(&key) {
            old.insert(key.clone(), value);
            added.push(key);
        }
    }
    added
}

fn load_map(path: &Path) -> Result<SettingsMap> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(McmdError::SettingsMissing(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&content).map_err(|source| McmdError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn resolve_node<'a>(settings: &'a SettingsMap, key: &str) -> Result<&'a Value> {
    let mut segments = key.split('.');
    let first = segments.next().unwrap_or_default();
    let mut node = settings
        .get(first)
        .ok_or_else(|| McmdError::SettingNotFound(key.to_string()))?;

    for segment in segments {
        node = node
            .as_object()
            .and_then(|obj| obj.get(segment))
            .ok_or_else(|| McmdError::SettingNotFound(key.to_string()))?;
    }
    Ok(node)
}

fn resolve_node_mut<'a>(settings: &'a mut SettingsMap, key: &str) -> Result<&'a mut Value> {
    let mut segments = key.split('.');
    let first = segments.next().unwrap_or_default();
    let mut node = settings
        .get_mut(first)
        .ok_or_else(|| McmdError::SettingNotFound(key.to_string()))?;

    for segment in segments {
        node = node
            .as_object_mut()
            .and_then(|obj| obj.get_mut(segment))
            .ok_or_else(|| McmdError::SettingNotFound(key.to_string()))?;
    }
    Ok(node)
}

fn resolve_value<'a>(settings: &'a SettingsMap, key: &str) -> Result<&'a Value> {
    resolve_node(settings, key)?
        .as_object()
        .and_then(|leaf| leaf.get("value"))
        .ok_or_else(|| McmdError::InvalidSetting(key.to_string()))
}

/// A node holding a `value`, or one with no nested settings under it
fn is_leaf(node: &SettingsMap) -> bool {
    node.contains_key("value") || !node.values().any(Value::is_object)
}

fn flatten_into(map: &SettingsMap, prefix: &str, out: &mut Vec<SettingEntry>) {
    for (key, node) in map {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match node.as_object() {
            Some(leaf) if leaf.contains_key("value") => out.push(SettingEntry {
                key: full_key,
                value: leaf.get("value").map(value_to_string).unwrap_or_default(),
                description: leaf
                    .get("description")
                    .map(value_to_string)
                    .unwrap_or_default(),
            }),
            Some(group) => flatten_into(group, &full_key, out),
            None => out.push(SettingEntry {
                key: full_key,
                value: value_to_string(node),
                description: String::new(),
            }),
        }
    }
}

/// Render a JSON value the way a user typed it
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on"
        ),
        _ => false,
    }
}

fn to_pretty_json(settings: &SettingsMap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    settings.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
