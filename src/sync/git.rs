//! Git working copy checks for imports

use std::path::Path;
use std::process::Command;

use git2::{Repository, Status, StatusOptions};
use tracing::debug;

use crate::error::{McmdError, Result};

/// A directory is treated as a working copy when it has a `.git` directory
pub fn is_git_repo(path: &Path) -> bool {
    path.join(".git").is_dir()
}

/// Uncommitted changes in porcelain-like form (`?? file`, `M file`)
///
/// Untracked files count as changes; ignored files do not.
pub fn local_changes(path: &Path) -> Result<Vec<String>> {
    let repo = Repository::open(path)?;

    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);

    let statuses = repo.statuses(Some(&mut options))?;
    let changes = statuses
        .iter()
        .filter(|entry| entry.status() != Status::CURRENT)
        .map(|entry| {
            format!(
                "{} {}",
                status_code(entry.status()),
                entry.path().unwrap_or("<non-utf8 path>")
            )
        })
        .collect();

    Ok(changes)
}

/// Run `git pull` inside `path`, returning its output
pub fn pull(path: &Path) -> Result<String> {
    debug!("Running git pull in {}", path.display());
    let output = Command::new("git")
        .arg("pull")
        .current_dir(path)
        .output()
        .map_err(|source| McmdError::LaunchError {
            name: "git".to_string(),
            source,
        })?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(McmdError::GitCommand {
            command: "pull".to_string(),
            path: path.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

fn status_code(status: Status) -> &'static str {
    if status.contains(Status::WT_NEW) {
        "??"
    } else if status.contains(Status::CONFLICTED) {
        "UU"
    } else if status.intersects(Status::INDEX_NEW) {
        "A"
    } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
        "D"
    } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
        "R"
    } else if status.intersects(Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE) {
        "T"
    } else {
        "M"
    }
}
