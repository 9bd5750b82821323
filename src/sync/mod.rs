//! Sync Engine
//!
//! Export copies every command directory from the registry root into
//! `<destination>/mcmd`; import copies `<source>/mcmd` back into the registry
//! root. Both are merges: conflicting files are overwritten, new files are
//! added, and nothing is deleted.
//!
//! When the import source is a git working copy it must be clean. A dirty
//! copy aborts the import before anything is copied; a clean one is pulled
//! first, and a failed pull only produces a warning.

pub mod git;
pub mod merge;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

pub use merge::{merge_tree, MergeStats};

use crate::config::Config;
use crate::error::{McmdError, Result, Warned};

/// Result of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// `<destination root>/<subdir>`
    pub destination: PathBuf,
    /// Command directories that were merged
    pub commands: Vec<String>,
    pub stats: MergeStats,
}

/// What happened with version control during an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState {
    /// No `.git` directory; nothing to synchronize
    NotARepository,
    /// Clean working copy, pulled successfully
    Pulled,
    /// Clean working copy, pull failed (import continued)
    PullFailed,
}

/// Result of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// `<source root>/<subdir>`
    pub source: PathBuf,
    pub state: SourceState,
    pub stats: MergeStats,
}

/// Copies the registry to and from external directories
#[derive(Debug, Clone, Copy)]
pub struct SyncEngine<'a> {
    config: &'a Config,
}

impl<'a> SyncEngine<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    fn registry_root(&self) -> &Path {
        &self.config.commands_dir
    }

    /// Merge every command directory into `<destination_root>/<subdir>`
    ///
    /// An empty registry is not an error; the report lists no commands and
    /// carries a warning.
    pub fn export(&self, destination_root: &Path) -> Result<Warned<ExportReport>> {
        let destination = destination_root.join(&self.config.export_subdir);
        let root = self.registry_root();

        // A copy inside the registry would be listed as a second set of commands
        if root.is_dir() && absolute_path(&destination)?.starts_with(fs::canonicalize(root)?) {
            return Err(McmdError::InvalidDirectory(destination));
        }
        fs::create_dir_all(&destination)?;

        if !root.is_dir() {
            return Err(McmdError::SourceMissing(root.to_path_buf()));
        }

        let mut commands = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() && !name.starts_with('.') {
                commands.push(name);
            }
        }
        commands.sort();

        let mut report = Warned::clean(ExportReport {
            destination: destination.clone(),
            commands: Vec::new(),
            stats: MergeStats::default(),
        });

        if commands.is_empty() {
            report.warn("No commands found to export");
            return Ok(report);
        }

        for name in &commands {
            let stats = merge_tree(&root.join(name), &destination.join(name))?;
            report.value.stats.add(stats);
        }
        report.value.commands = commands;

        info!(
            "Exported {} commands to {}",
            report.value.commands.len(),
            destination.display()
        );
        Ok(report)
    }

    /// Merge `<source_root>/<subdir>` into the registry root
    ///
    /// Fails with [`McmdError::ChangesPending`] when `source_root` is a git
    /// working copy with uncommitted changes; the registry is left untouched.
    pub fn import(&self, source_root: &Path) -> Result<Warned<ImportReport>> {
        let source = source_root.join(&self.config.export_subdir);
        if !source.is_dir() {
            return Err(McmdError::InvalidDirectory(source));
        }

        let mut report = Warned::clean(ImportReport {
            source: source.clone(),
            state: SourceState::NotARepository,
            stats: MergeStats::default(),
        });

        if git::is_git_repo(source_root) {
            info!("{} is a git repository", source_root.display());
            let changes = git::local_changes(source_root)?;
            if !changes.is_empty() {
                return Err(McmdError::ChangesPending {
                    path: source_root.to_path_buf(),
                    changes,
                });
            }

            report.value.state = match git::pull(source_root) {
                Ok(output) => {
                    info!("Pulled latest changes in {}: {}", source_root.display(), output);
                    SourceState::Pulled
                }
                Err(e) => {
                    report.warn(format!(
                        "Error pulling changes in {}: {}",
                        source_root.display(),
                        e
                    ));
                    SourceState::PullFailed
                }
            };
        } else {
            info!("'{}' is not a git repository", source_root.display());
        }

        let root = self.registry_root();
        fs::create_dir_all(root)?;
        report.value.stats = merge_tree(&source, root)?;

        info!("Imported from '{}'", source.display());
        Ok(report)
    }
}

/// Canonical form of a path that may not exist yet
///
/// The deepest existing ancestor is canonicalized and the rest appended.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    while !existing.as_os_str().is_empty() && !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(path.to_path_buf()),
        }
    }

    let base = if existing.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        fs::canonicalize(existing)?
    };
    Ok(rest.into_iter().rev().fold(base, |acc, name| acc.join(name)))
}
