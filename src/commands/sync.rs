//! Export / Import Commands
//!
//! Implements `mcmd export` and `mcmd import`. Without an explicit directory
//! the configured `MCMD_EXPORT_DIR` is offered first, then a directory is
//! asked for.

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;

use super::output::print_warnings;
use crate::config::Config;
use crate::error::McmdError;
use crate::interact::Interaction;
use crate::sync::{SourceState, SyncEngine};

/// Options for the export command
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Destination root; `<to>/mcmd` receives the commands
    pub to: Option<PathBuf>,
}

/// Options for the import command
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Source root; commands are read from `<from>/mcmd`
    pub from: Option<PathBuf>,
}

/// Execute the export command
pub fn execute_export(
    options: ExportOptions,
    config: &Config,
    ui: &mut dyn Interaction,
) -> Result<()> {
    let Some(destination) = pick_directory(options.to, config, ui, "export to")? else {
        println!("{} No destination folder selected. Export canceled", style("!").yellow());
        return Ok(());
    };

    let report = SyncEngine::new(config).export(&destination)?;
    if !report.value.commands.is_empty() {
        println!(
            "{} Exported {} commands ({} files) to {}",
            style("✓").green(),
            report.value.commands.len(),
            report.value.stats.files,
            report.value.destination.display()
        );
    }
    print_warnings(&report.warnings);
    Ok(())
}

/// Execute the import command
pub fn execute_import(
    options: ImportOptions,
    config: &Config,
    ui: &mut dyn Interaction,
) -> Result<()> {
    let Some(source) = pick_directory(options.from, config, ui, "import from")? else {
        println!("{} No folder selected. Import canceled", style("!").yellow());
        return Ok(());
    };

    let report = match SyncEngine::new(config).import(&source) {
        Ok(report) => report,
        Err(McmdError::ChangesPending { path, changes }) => {
            eprintln!(
                "{} Uncommitted changes detected in {}:",
                style("✗").red(),
                path.display()
            );
            for change in &changes {
                eprintln!("    {}", style(change).red());
            }
            eprintln!("  Please commit the changes before import");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if report.value.state == SourceState::Pulled {
        println!("{} Pulled latest changes in {}", style("✓").green(), source.display());
    }
    print_warnings(&report.warnings);
    println!(
        "{} Imported {} files from {}",
        style("✓").green(),
        report.value.stats.files,
        report.value.source.display()
    );
    Ok(())
}

fn pick_directory(
    explicit: Option<PathBuf>,
    config: &Config,
    ui: &mut dyn Interaction,
    action: &str,
) -> Result<Option<PathBuf>> {
    if let Some(dir) = explicit {
        return Ok(Some(dir));
    }

    if let Some(default) = config.export_dir.as_deref() {
        if ui.confirm(&default_prompt(action, default))? {
            return Ok(Some(default.to_path_buf()));
        }
    }

    Ok(ui.choose_directory(&format!("Folder to {}", action))?)
}

fn default_prompt(action: &str, default: &Path) -> String {
    format!("Do you want to {} the default location ({})?", action, default.display())
}
