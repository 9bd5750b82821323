//! Command Registry
//!
//! Commands live one per directory under the registry root:
//!
//! ```text
//! <root>/<name>/<name>.sh     runnable script
//! <root>/<name>/<name>.desc   description (optional)
//! ```
//!
//! There is no index file. Every listing walks the tree again, so edits made
//! outside mcmd are always picked up.

pub mod entry;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

pub use entry::{
    is_valid_name, truncate_for_display, validate_name, CommandEntry, CommandPaths,
    DESCRIPTION_EXTENSION, DISPLAY_LIMIT, SCRIPT_EXTENSION,
};

use crate::config::Config;
use crate::error::{McmdError, Result, Warned};
use crate::interact::Interaction;
use crate::provision::{self, Operation, ScriptSource};
use crate::sync::SyncEngine;

/// Input for [`Registry::create`]
///
/// Missing pieces are asked for through the [`Interaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequest {
    pub name: String,
    pub description: Option<String>,
    pub source: Option<ScriptSource>,
}

impl CreateRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn source(mut self, source: ScriptSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// A command written by create/update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedCommand {
    pub name: String,
    pub script: PathBuf,
    pub operation: Operation,
    /// An interpreter line was prepended
    pub interpreter_added: bool,
    /// Auto-export destination, when an export ran
    pub exported_to: Option<PathBuf>,
}

/// Result of [`Registry::create`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Saved(Warned<SavedCommand>),
    /// The user declined; nothing was written
    Cancelled,
}

/// A command deleted by [`Registry::remove`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCommand {
    pub name: String,
    pub script: PathBuf,
    /// Directories pruned because they became empty
    pub removed_dirs: Vec<PathBuf>,
}

/// Command registry rooted at `config.commands_dir`
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    config: &'a Config,
}

impl<'a> Registry<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn root(&self) -> &Path {
        &self.config.commands_dir
    }

    pub fn paths(&self, name: &str) -> CommandPaths {
        CommandPaths::new(self.root(), name)
    }

    /// Every script under the root, indexed in walk order
    ///
    /// Commands without a description file are included here so indices
    /// agree with [`Registry::remove`].
    pub fn scan(&self) -> Result<Vec<CommandEntry>> {
        let root = self.root();
        if !root.is_dir() {
            debug!("Registry root {} does not exist", root.display());
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for item in walker {
            let item = item?;
            if !item.file_type().is_file() {
                continue;
            }
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let description_path = path.with_extension(DESCRIPTION_EXTENSION);
            let description = if description_path.is_file() {
                Some(fs::read_to_string(&description_path)?.trim().to_string())
            } else {
                None
            };

            entries.push(CommandEntry {
                index: entries.len() + 1,
                name: name.to_string(),
                script: path.to_path_buf(),
                description,
            });
        }

        Ok(entries)
    }

    /// Commands that have a description, with their walk-order indices
    pub fn list(&self) -> Result<Vec<CommandEntry>> {
        Ok(self
            .scan()?
            .into_iter()
            .filter(|e| e.description.is_some())
            .collect())
    }

    /// Script path for a command name
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        let script = self.paths(name).script;
        if script.is_file() {
            Ok(script)
        } else {
            Err(McmdError::CommandNotFound(name.to_string()))
        }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Full description text of a command
    pub fn describe(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        let description = self.paths(name).description;
        if !description.is_file() {
            return Err(McmdError::DescriptionMissing(name.to_string()));
        }
        Ok(fs::read_to_string(description)?.trim_end().to_string())
    }

    /// Create a command, or update it after confirmation if it exists
    ///
    /// New commands must have a non-empty description. Updates keep the
    /// current description unless a non-empty replacement is given. All
    /// questions are asked before anything is written, so a rejected name,
    /// a declined update or a missing source file leaves no trace.
    pub fn create(
        &self,
        request: CreateRequest,
        ui: &mut dyn Interaction,
    ) -> Result<CreateOutcome> {
        let name = request.name.trim().to_string();
        validate_name(&name)?;

        let paths = self.paths(&name);
        let provided = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let (operation, description) = if paths.script.is_file() {
            warn!("Command 'mcmd exec {}' already exists", name);
            let update = ui.confirm(&format!(
                "Command 'mcmd exec {}' already exists. Do you want to update it?",
                name
            ))?;
            if !update {
                info!("Command update canceled");
                return Ok(CreateOutcome::Cancelled);
            }

            let description = match provided {
                Some(d) => Some(d),
                None => {
                    let answer = ui.input(&format!(
                        "Update the description for 'mcmd exec {}' (press enter to keep it)",
                        name
                    ))?;
                    Some(answer.trim().to_string()).filter(|d| !d.is_empty())
                }
            };
            (Operation::Update, description)
        } else {
            let description = match provided {
                Some(d) => d,
                None => prompt_description(&name, ui)?,
            };
            (Operation::Create, Some(description))
        };

        let source = match request.source {
            Some(source) => source,
            None => match choose_source(ui)? {
                Some(source) => source,
                None => {
                    info!("No file selected. Command {} canceled", operation.as_str());
                    return Ok(CreateOutcome::Cancelled);
                }
            },
        };
        if let ScriptSource::File(path) = &source {
            if !path.is_file() {
                return Err(McmdError::ScriptNotFound(path.clone()));
            }
        }

        fs::create_dir_all(&paths.dir)?;
        if let Some(description) = &description {
            fs::write(&paths.description, format!("{}\n", description))?;
        }

        let interpreter_added = provision::provision(&paths.script, &source, operation, ui)?;
        info!("Command 'mcmd exec {}' {}", name, operation.as_str());

        let mut outcome = Warned::clean(SavedCommand {
            name,
            script: paths.script.clone(),
            operation,
            interpreter_added,
            exported_to: None,
        });

        if let Err(e) = provision::make_executable(&paths.script) {
            outcome.warn(format!("Error while changing the permission: {}", e));
        }

        let exported_to = outcome.absorb(self.auto_export());
        outcome.value.exported_to = exported_to;

        Ok(CreateOutcome::Saved(outcome))
    }

    /// Delete the command at a 1-based index from [`Registry::scan`]
    ///
    /// Removes the script and description, then prunes directories that
    /// became empty, walking up until the registry root (which is kept).
    pub fn remove(&self, index: usize) -> Result<RemovedCommand> {
        let commands = self.scan()?;
        let entry = index
            .checked_sub(1)
            .and_then(|i| commands.get(i))
            .ok_or_else(|| McmdError::InvalidChoice(index.to_string()))?;

        fs::remove_file(&entry.script)?;
        let description = entry.description_path();
        if description.is_file() {
            fs::remove_file(&description)?;
        }

        let removed_dirs = prune_empty_dirs(entry.dir(), self.root())?;
        info!("Command 'mcmd exec {}' removed", entry.name);

        Ok(RemovedCommand {
            name: entry.name.clone(),
            script: entry.script.clone(),
            removed_dirs,
        })
    }

    /// Export after a save when auto-export is on; failures become warnings
    fn auto_export(&self) -> Warned<Option<PathBuf>> {
        let mut result = Warned::clean(None);
        if !self.config.auto_export {
            return result;
        }

        let Some(export_dir) = &self.config.export_dir else {
            result.warn("Auto export is enabled but MCMD_EXPORT_DIR is not set");
            return result;
        };

        match SyncEngine::new(self.config).export(export_dir) {
            Ok(report) => {
                let report = result.absorb(report);
                result.value = Some(report.destination);
            }
            Err(e) => result.warn(format!("Error while performing auto export: {}", e)),
        }
        result
    }
}

fn prompt_description(name: &str, ui: &mut dyn Interaction) -> Result<String> {
    loop {
        let answer = ui.input(&format!("Enter a description for 'mcmd exec {}'", name))?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        warn!("Description cannot be empty. Please enter a valid description");
    }
}

fn choose_source(ui: &mut dyn Interaction) -> Result<Option<ScriptSource>> {
    if ui.confirm("Do you already have a script file for this command?")? {
        Ok(ui
            .choose_file("Path to the .sh file")?
            .map(ScriptSource::File))
    } else {
        Ok(Some(ScriptSource::Editor))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Remove `start` and its ancestors while empty, stopping at `root`
fn prune_empty_dirs(start: &Path, root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    let mut dir = start.to_path_buf();

    while dir != root && dir.starts_with(root) {
        if fs::read_dir(&dir)?.next().is_some() {
            break;
        }
        fs::remove_dir(&dir)?;
        debug!("Removed empty directory {}", dir.display());
        removed.push(dir.clone());

        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => break,
        }
    }

    Ok(removed)
}
