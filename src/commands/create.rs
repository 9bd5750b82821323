//! Create Command
//!
//! Implements `mcmd create`: register a new command or update an existing
//! one. Anything not given on the command line is prompted for.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use super::output::print_warnings;
use crate::config::Config;
use crate::interact::Interaction;
use crate::provision::{Operation, ScriptSource};
use crate::registry::{CreateOutcome, CreateRequest, Registry};

/// Options for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Command name (prompted when absent)
    pub name: Option<String>,
    /// Description (prompted when absent)
    pub description: Option<String>,
    /// Existing script to copy instead of opening the editor
    pub from: Option<PathBuf>,
}

/// Execute the create command
pub fn execute_create(
    options: CreateOptions,
    config: &Config,
    ui: &mut dyn Interaction,
) -> Result<()> {
    let name = match options.name {
        Some(name) => name,
        None => ui.input("Enter the command name: mcmd exec")?,
    };

    let request = CreateRequest {
        name,
        description: options.description,
        source: options.from.map(ScriptSource::File),
    };

    match Registry::new(config).create(request, ui)? {
        CreateOutcome::Cancelled => {
            println!("{} Nothing changed", style("•").dim());
        }
        CreateOutcome::Saved(saved) => {
            let command = &saved.value;
            let verb = match command.operation {
                Operation::Create => "Created",
                Operation::Update => "Updated",
            };
            println!(
                "{} {} 'mcmd exec {}'",
                style("✓").green(),
                verb,
                style(&command.name).cyan()
            );
            println!("  Script: {}", command.script.display());
            if command.interpreter_added {
                println!("  Added interpreter line to the script");
            }
            if let Some(dir) = &command.exported_to {
                println!("{} Auto-exported to {}", style("✓").green(), dir.display());
            }
            print_warnings(&saved.warnings);
        }
    }

    Ok(())
}
