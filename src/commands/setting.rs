//! Setting Command
//!
//! Implements `mcmd setting list|get|edit|merge`.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::error::McmdError;
use crate::settings::{self, value_to_string};

/// Setting subcommands
#[derive(Debug, Clone)]
pub enum SettingSubcommand {
    /// Show every setting
    List,
    /// Show one value
    Get { key: String },
    /// Change the value of an existing setting
    Edit { key: String, value: String },
    /// Add keys from another settings file that are missing here
    Merge { file: PathBuf },
}

/// Execute setting subcommands
pub fn execute_setting(cmd: SettingSubcommand, config: &Config) -> Result<()> {
    let store = config.settings();

    match cmd {
        SettingSubcommand::List => {
            let entries = store.list()?;
            let key_width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0).max(3);
            let value_width = entries.iter().map(|e| e.value.len()).max().unwrap_or(0).max(5);

            println!(
                "{}  {}  {}",
                style(format!("{:<key_width$}", "Key")).blue().bold(),
                style(format!("{:<value_width$}", "Value")).blue().bold(),
                style("Description").blue().bold()
            );
            for entry in &entries {
                println!(
                    "{}  {:<value_width$}  {}",
                    style(format!("{:<key_width$}", entry.key)).cyan(),
                    entry.value,
                    style(&entry.description).dim()
                );
            }
        }

        SettingSubcommand::Get { key } => {
            let value = store.get(&key)?;
            println!("{}", value_to_string(&value));
        }

        SettingSubcommand::Edit { key, value } => match store.set(&key, &value) {
            Ok(previous) => {
                println!(
                    "{} Setting '{}' updated to '{}' (was '{}')",
                    style("✓").green(),
                    key,
                    value,
                    previous
                );
            }
            Err(McmdError::SettingNotFound(_)) => {
                println!("{} Setting '{}' does not exist", style("!").yellow(), key);
            }
            Err(McmdError::InvalidSetting(_)) => {
                println!(
                    "{} Setting '{}' is not a setting entry and cannot be updated",
                    style("!").yellow(),
                    key
                );
            }
            Err(e) => return Err(e.into()),
        },

        SettingSubcommand::Merge { file } => {
            let added = settings::merge_new_keys(store.path(), &file)?;
            if added.is_empty() {
                println!("{} Settings already up to date", style("•").dim());
            } else {
                println!("{} Added settings:", style("✓").green());
                for key in &added {
                    println!("    {}", style(key).cyan());
                }
            }
        }
    }

    Ok(())
}
