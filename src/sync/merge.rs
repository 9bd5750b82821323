//! Tree merge
//!
//! Copies a directory tree onto another: files with the same relative path
//! are overwritten, new files are added, and nothing already in the
//! destination is deleted.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// Counts from a tree merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Files written to the destination
    pub files: usize,
    /// Directories created in the destination
    pub dirs_created: usize,
}

impl MergeStats {
    pub fn add(&mut self, other: MergeStats) {
        self.files += other.files;
        self.dirs_created += other.dirs_created;
    }
}

/// Merge `source` into `destination`, creating `destination` if needed
///
/// File contents and permission bits are copied. Merging a tree onto itself
/// is a no-op.
pub fn merge_tree(source: &Path, destination: &Path) -> Result<MergeStats> {
    let mut stats = MergeStats::default();

    if same_location(source, destination) {
        debug!("Skipping merge of {} onto itself", source.display());
        return Ok(stats);
    }

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            if !target.is_dir() {
                fs::create_dir_all(&target)?;
                stats.dirs_created += 1;
            }
            continue;
        }

        if let Some(parent) = target.parent() {
            if !parent.is_dir() {
                fs::create_dir_all(parent)?;
                stats.dirs_created += 1;
            }
        }
        fs::copy(entry.path(), &target)?;
        stats.files += 1;
        debug!("Copied {} -> {}", entry.path().display(), target.display());
    }

    Ok(stats)
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
