//! Command entries and naming rules

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{McmdError, Result};

/// Extension of runnable command scripts
pub const SCRIPT_EXTENSION: &str = "sh";

/// Extension of command description files
pub const DESCRIPTION_EXTENSION: &str = "desc";

/// Descriptions longer than this are shortened for display
pub const DISPLAY_LIMIT: usize = 200;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

/// Letters, digits and underscores, not starting with a digit
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(McmdError::InvalidName(name.to_string()))
    }
}

/// File locations for a command under a registry root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPaths {
    pub dir: PathBuf,
    pub script: PathBuf,
    pub description: PathBuf,
}

impl CommandPaths {
    /// `<root>/<name>/<name>.sh` and `<root>/<name>/<name>.desc`
    pub fn new(root: &Path, name: &str) -> Self {
        let dir = root.join(name);
        Self {
            script: dir.join(format!("{}.{}", name, SCRIPT_EXTENSION)),
            description: dir.join(format!("{}.{}", name, DESCRIPTION_EXTENSION)),
            dir,
        }
    }
}

/// A registered command discovered by walking the registry root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    /// 1-based position in walk order
    pub index: usize,
    pub name: String,
    pub script: PathBuf,
    /// Full description text, trimmed
    pub description: Option<String>,
}

impl CommandEntry {
    /// Directory holding the script
    pub fn dir(&self) -> &Path {
        self.script.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Sibling description file path (may not exist)
    pub fn description_path(&self) -> PathBuf {
        self.script.with_extension(DESCRIPTION_EXTENSION)
    }

    /// Description shortened for tables
    pub fn display_description(&self) -> String {
        self.description
            .as_deref()
            .map(truncate_for_display)
            .unwrap_or_default()
    }
}

/// Cut to [`DISPLAY_LIMIT`] characters, marking the cut with `...`
pub fn truncate_for_display(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() > DISPLAY_LIMIT {
        let cut: String = text.chars().take(DISPLAY_LIMIT).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["build", "deploy_prod", "_private", "x1", "CamelCase"] {
            assert!(is_valid_name(name), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "1build", "with-dash", "has space", "../escape", "a.b", "dir/name"] {
            assert!(!is_valid_name(name), "{} should be invalid", name);
        }
        assert!(matches!(validate_name("a-b"), Err(McmdError::InvalidName(_))));
    }

    #[test]
    fn test_command_paths_layout() {
        let paths = CommandPaths::new(Path::new("/r"), "build");
        assert_eq!(paths.dir, PathBuf::from("/r/build"));
        assert_eq!(paths.script, PathBuf::from("/r/build/build.sh"));
        assert_eq!(paths.description, PathBuf::from("/r/build/build.desc"));
    }

    #[test]
    fn test_truncate_for_display() {
        assert_eq!(truncate_for_display("  short  "), "short");

        let long = "é".repeat(DISPLAY_LIMIT + 5);
        let shown = truncate_for_display(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), DISPLAY_LIMIT + 3);

        let exact = "a".repeat(DISPLAY_LIMIT);
        assert_eq!(truncate_for_display(&exact), exact);
    }

    #[test]
    fn test_entry_description_path() {
        let entry = CommandEntry {
            index: 1,
            name: "build".to_string(),
            script: PathBuf::from("/r/build/build.sh"),
            description: None,
        };
        assert_eq!(entry.description_path(), PathBuf::from("/r/build/build.desc"));
        assert_eq!(entry.dir(), Path::new("/r/build"));
        assert_eq!(entry.display_description(), "");
    }
}
