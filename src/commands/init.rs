//! Init Command
//!
//! Implements `mcmd init`: create the home directory and seed
//! `settings.json` with the built-in defaults. Running it again merges in
//! default keys added by newer versions without touching existing values.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::config::{default_home, Config};
use crate::settings::{self, SeedOutcome, SettingsStore};

/// Options for the init command
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Home directory to initialize
    pub home: PathBuf,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    let home = options.home;
    if !home.exists() {
        std::fs::create_dir_all(&home)
            .with_context(|| format!("Failed to create {}", home.display()))?;
        println!("{} Created {}", style("✓").green(), home.display());
    }

    let store = SettingsStore::in_dir(&home);
    match store.seed()? {
        SeedOutcome::Created => {
            // Keep commands next to a non-default home
            if home != default_home() {
                store.set(settings::COMMANDS_DIR_KEY, &home.to_string_lossy())?;
            }
            println!("{} Created {}", style("✓").green(), store.path().display());
        }
        SeedOutcome::Merged(added) if added.is_empty() => {
            println!("{} Settings already up to date", style("•").dim());
        }
        SeedOutcome::Merged(added) => {
            println!("{} Added new settings:", style("✓").green());
            for key in &added {
                println!("    {}", style(key).cyan());
            }
        }
    }

    let config = Config::load(&home)?;
    if !config.commands_dir.exists() {
        std::fs::create_dir_all(&config.commands_dir).with_context(|| {
            format!("Failed to create {}", config.commands_dir.display())
        })?;
        println!(
            "{} Created {}",
            style("✓").green(),
            config.commands_dir.display()
        );
    }

    println!("\n{}", style("Next steps:").bold());
    println!("  1. Run {} to add a command", style("mcmd create").cyan());
    println!(
        "  2. Run {} to enable auto export",
        style("mcmd setting edit ENABLE_AUTO_EXPORT true").cyan()
    );

    Ok(())
}
