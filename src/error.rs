//! Error types
//!
//! One error enum for the whole library. Validation failures abort an
//! operation before it touches the filesystem; best-effort steps that fail
//! after the primary work succeeded are carried as warnings in [`Warned`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the mcmd library
#[derive(Debug, Error)]
pub enum McmdError {
    #[error("Invalid command name '{0}'. Command names may only contain letters, digits and underscores, and must not start with a digit")]
    InvalidName(String),

    #[error("Setting '{0}' does not exist")]
    SettingNotFound(String),

    #[error("Setting '{0}' does not have a 'value' field")]
    InvalidSetting(String),

    #[error("Settings file not found: {}", .0.display())]
    SettingsMissing(PathBuf),

    #[error("Error decoding settings file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command 'mcmd exec {0}' not found")]
    CommandNotFound(String),

    #[error("Description for 'mcmd exec {0}' does not exist")]
    DescriptionMissing(String),

    #[error("Invalid choice '{0}'. No command removed")]
    InvalidChoice(String),

    #[error("Source directory '{}' does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("Invalid directory '{}' does not exist", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Uncommitted changes detected in '{}':\n{}", path.display(), changes.join("\n"))]
    ChangesPending { path: PathBuf, changes: Vec<String> },

    #[error("git {command} failed in '{}': {stderr}", path.display())]
    GitCommand {
        command: String,
        path: PathBuf,
        stderr: String,
    },

    #[error("Script file '{}' does not exist", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("No script was written to '{}'", .0.display())]
    ScriptNotWritten(PathBuf),

    #[error("Failed to launch '{name}': {source}")]
    LaunchError {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{name}' exited with {}", exit_description(*code))]
    ExecutionFailed { name: String, code: Option<i32> },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "a signal".to_string(),
    }
}

impl From<dialoguer::Error> for McmdError {
    fn from(err: dialoguer::Error) -> Self {
        McmdError::Prompt(err.to_string())
    }
}

/// Result type for mcmd operations
pub type Result<T> = std::result::Result<T, McmdError>;

/// A successful result that may carry non-fatal warnings
///
/// Used where a step after the primary operation is allowed to fail
/// (auto-export, `git pull`, setting the executable bit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warned<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> Warned<T> {
    /// Wrap a value with no warnings
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record a warning and log it
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("warning: {}", message);
        self.warnings.push(message);
    }

    /// Take over the warnings of another result
    pub fn absorb<U>(&mut self, other: Warned<U>) -> U {
        self.warnings.extend(other.warnings);
        other.value
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Warned<U> {
        Warned {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
