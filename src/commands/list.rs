//! List Command
//!
//! Implements `mcmd list`.

use anyhow::Result;
use console::style;

use super::output::print_command_table;
use crate::config::Config;
use crate::registry::Registry;

/// Execute the list command
pub fn execute_list(config: &Config) -> Result<()> {
    let commands = Registry::new(config).list()?;

    if commands.is_empty() {
        println!("{} No commands found", style("!").yellow());
        println!("  Run {} to add one", style("mcmd create").cyan());
        return Ok(());
    }

    println!("{}", style("CUSTOM COMMANDS:").yellow().bold());
    print_command_table(&commands);
    Ok(())
}
