//! Exec Command
//!
//! Implements `mcmd exec <name> [args...]` and `mcmd exec <name> help`.

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::error::McmdError;
use crate::launcher::Launcher;
use crate::registry::Registry;

/// Options for the exec command
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub name: String,
    /// Forwarded verbatim to the script
    pub args: Vec<String>,
}

/// Execute the exec command
///
/// The process exits with the script's exit code when it fails.
pub fn execute_exec(options: ExecOptions, config: &Config) -> Result<()> {
    if Launcher::is_help_request(&options.args) {
        let description = Registry::new(config).describe(&options.name)?;
        println!(
            "{}  {}",
            style("Command").blue().bold(),
            style(format!("mcmd exec {}", options.name)).cyan()
        );
        println!("{}", style("Description").blue().bold());
        println!("{}", description);
        return Ok(());
    }

    match Launcher::new(config).execute(&options.name, &options.args) {
        Ok(()) => Ok(()),
        Err(McmdError::ExecutionFailed { name, code }) => {
            eprintln!(
                "{} Error executing command '{}': {}",
                style("✗").red(),
                name,
                code.map(|c| format!("exit status {}", c))
                    .unwrap_or_else(|| "terminated by signal".to_string())
            );
            std::process::exit(code.unwrap_or(1));
        }
        Err(e) => Err(e.into()),
    }
}
