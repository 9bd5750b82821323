//! Script Provisioning
//!
//! Fills a command's script file either by copying an existing script or by
//! handing the target path to an editor, then makes sure the script starts
//! with an interpreter line so it can be executed directly.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{McmdError, Result};
use crate::interact::Interaction;

/// Prefix every managed script's first line must carry
pub const INTERPRETER_PREFIX: &[u8] = b"#!";

/// Interpreter line added to scripts that lack one
pub const DEFAULT_INTERPRETER: &str = "#!/bin/bash";

/// Where a script's content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Copy this existing file
    File(PathBuf),
    /// Open the target in the editor
    Editor,
}

/// Whether the script is new or replaces an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

impl Operation {
    /// Past tense used in messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "created",
            Operation::Update => "updated",
        }
    }
}

/// Write script content to `target` and normalize its interpreter line
///
/// Returns `true` when an interpreter line had to be added.
pub fn provision(
    target: &Path,
    source: &ScriptSource,
    operation: Operation,
    ui: &mut dyn Interaction,
) -> Result<bool> {
    match source {
        ScriptSource::File(path) => {
            if !path.is_file() {
                return Err(McmdError::ScriptNotFound(path.clone()));
            }
            if is_same_file(path, target) {
                // Copying a file onto itself truncates it first
                debug!("{} is already the command script", path.display());
            } else {
                fs::copy(path, target)?;
                info!("Script {} with the contents of {}", operation.as_str(), path.display());
            }
        }
        ScriptSource::Editor => {
            ui.edit(target)?;
            if !target.is_file() {
                return Err(McmdError::ScriptNotWritten(target.to_path_buf()));
            }
        }
    }

    ensure_interpreter(target)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Prepend [`DEFAULT_INTERPRETER`] unless the first line already starts with `#!`
///
/// Returns `true` when the file was modified.
pub fn ensure_interpreter(path: &Path) -> Result<bool> {
    let content = fs::read(path)?;
    if content.starts_with(INTERPRETER_PREFIX) {
        return Ok(false);
    }

    let mut updated = Vec::with_capacity(DEFAULT_INTERPRETER.len() + 1 + content.len());
    updated.extend_from_slice(DEFAULT_INTERPRETER.as_bytes());
    updated.push(b'\n');
    updated.extend_from_slice(&content);
    fs::write(path, updated)?;

    info!("Added interpreter line to '{}'", path.display());
    Ok(true)
}

/// Set mode 0755 on the script
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Check whether the owner execute bit is set
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o100 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
