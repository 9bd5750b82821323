//! Launcher
//!
//! Runs a registered command as a child process with inherited stdio.

use std::process::Command;

use tracing::debug;

use crate::config::Config;
use crate::error::{McmdError, Result};
use crate::registry::Registry;

/// Argument that prints a command's description instead of running it
pub const HELP_ARG: &str = "help";

#[derive(Debug, Clone, Copy)]
pub struct Launcher<'a> {
    registry: Registry<'a>,
}

impl<'a> Launcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            registry: Registry::new(config),
        }
    }

    /// Run `name` with `args` and wait for it
    ///
    /// Spawn failures (missing execute bit, bad interpreter line) are
    /// [`McmdError::LaunchError`]; a non-zero exit is
    /// [`McmdError::ExecutionFailed`].
    pub fn execute(&self, name: &str, args: &[String]) -> Result<()> {
        let script = self.registry.resolve(name)?;
        debug!("Executing {} {:?}", script.display(), args);

        let status = Command::new(&script)
            .args(args)
            .status()
            .map_err(|source| McmdError::LaunchError {
                name: name.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(McmdError::ExecutionFailed {
                name: name.to_string(),
                code: status.code(),
            })
        }
    }

    /// True when the arguments ask for the command's description
    pub fn is_help_request(args: &[String]) -> bool {
        matches!(args, [only] if only == HELP_ARG)
    }
}
