//! Interaction
//!
//! Human-in-the-loop capabilities the core calls into: confirmations, text
//! input, choosing files or directories, and editing a script. The terminal
//! implementation uses `dialoguer`; tests substitute a scripted one.

use std::path::{Path, PathBuf};
use std::process::Command;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing::{debug, info};

use crate::config::expand_tilde;
use crate::error::{McmdError, Result};

/// Interactive capabilities needed by create/remove/export/import
pub trait Interaction {
    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Read a line of text; may be empty
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Pick an existing file. `None` means the user cancelled.
    fn choose_file(&mut self, prompt: &str) -> Result<Option<PathBuf>>;

    /// Pick a directory. `None` means the user cancelled.
    fn choose_directory(&mut self, prompt: &str) -> Result<Option<PathBuf>>;

    /// Let the user edit `path`, returning once they are done
    fn edit(&mut self, path: &Path) -> Result<()>;
}

/// Terminal prompts plus an external editor process
#[derive(Debug, Clone)]
pub struct TerminalInteraction {
    editor: String,
}

impl TerminalInteraction {
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    fn path_prompt(&self, prompt: &str) -> Result<Option<PathBuf>> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} (leave empty to cancel)", prompt))
            .allow_empty(true)
            .interact_text()?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(expand_tilde(answer)))
        }
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn choose_file(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        self.path_prompt(prompt)
    }

    fn choose_directory(&mut self, prompt: &str) -> Result<Option<PathBuf>> {
        self.path_prompt(prompt)
    }

    fn edit(&mut self, path: &Path) -> Result<()> {
        launch_editor(&self.editor, path)
    }
}

/// Run `editor path` with inherited stdio and wait for it
///
/// The editor string may carry arguments (`code --wait`).
pub fn launch_editor(editor: &str, path: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| McmdError::Prompt("no editor configured".to_string()))?;

    info!("Opening {} for {}", program, path.display());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| McmdError::LaunchError {
            name: program.to_string(),
            source,
        })?;

    debug!("Editor exited with {}", status);
    if status.success() {
        Ok(())
    } else {
        Err(McmdError::ExecutionFailed {
            name: program.to_string(),
            code: status.code(),
        })
    }
}
