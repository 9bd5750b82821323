//! Info Command
//!
//! Implements `mcmd info`: where things live and whether auto export is on.

use anyhow::Result;
use console::style;

use crate::config::Config;

/// Execute the info command
pub fn execute_info(config: &Config) -> Result<()> {
    println!("{} {}", style("Home:").bold(), config.home.display());
    println!("{} {}", style("Settings:").bold(), config.settings_path.display());
    println!("{} {}", style("Commands:").bold(), config.commands_dir.display());
    println!("{} {}", style("Editor:").bold(), config.editor);

    if config.auto_export {
        println!("{} Auto export enabled", style("✓").green());
        match &config.export_dir {
            Some(dir) => println!("  Export dir: {}", dir.display()),
            None => eprintln!(
                "{} Set export dir using {}",
                style("✗").red(),
                style("mcmd setting edit MCMD_EXPORT_DIR <path>").cyan()
            ),
        }
    } else {
        println!(
            "{} Enable auto export using {}",
            style("!").yellow(),
            style("mcmd setting edit ENABLE_AUTO_EXPORT true").cyan()
        );
    }

    Ok(())
}
