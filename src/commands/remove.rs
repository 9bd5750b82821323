//! Remove Command
//!
//! Implements `mcmd remove [index]`.

use anyhow::Result;
use console::style;

use super::output::print_command_table;
use crate::config::Config;
use crate::error::McmdError;
use crate::interact::Interaction;
use crate::registry::Registry;

/// Options for the remove command
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// 1-based index as shown by `mcmd list`; prompted when absent
    pub index: Option<usize>,
}

/// Execute the remove command
pub fn execute_remove(
    options: RemoveOptions,
    config: &Config,
    ui: &mut dyn Interaction,
) -> Result<()> {
    let registry = Registry::new(config);

    let index = match options.index {
        Some(index) => index,
        None => {
            if registry.scan()?.is_empty() {
                println!("{} No commands found", style("!").yellow());
                return Ok(());
            }
            print_command_table(&registry.list()?);
            let answer = ui.input("Enter the number of the command to remove")?;
            parse_choice(&answer)?
        }
    };

    let removed = registry.remove(index)?;
    println!(
        "{} Removed 'mcmd exec {}'",
        style("✓").green(),
        style(&removed.name).cyan()
    );
    for dir in &removed.removed_dirs {
        println!("  {} {}", style("removed").dim(), dir.display());
    }

    Ok(())
}

fn parse_choice(answer: &str) -> std::result::Result<usize, McmdError> {
    let answer = answer.trim();
    answer
        .parse()
        .map_err(|_| McmdError::InvalidChoice(answer.to_string()))
}
