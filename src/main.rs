#![forbid(unsafe_code)]
//! mcmd Command Line Interface

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use mcmd::commands::{
    execute_create, execute_exec, execute_export, execute_import, execute_info, execute_init,
    execute_list, execute_remove, execute_setting, CreateOptions, ExecOptions, ExportOptions,
    ImportOptions, InitOptions, RemoveOptions, SettingSubcommand,
};
use mcmd::config::default_home;
use mcmd::{Config, SettingsStore, TerminalInteraction};

#[derive(Parser)]
#[command(name = "mcmd")]
#[command(about = "Register shell scripts as short commands and sync them across machines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Home directory holding settings.json (default: ~/.mcmd_commands)
    #[arg(long, global = true, env = "MCMD_HOME")]
    home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the home directory and default settings
    Init,

    /// Create a new command or update an existing one
    Create {
        /// Command name
        #[arg(long, short)]
        name: Option<String>,

        /// Command description
        #[arg(long, short)]
        description: Option<String>,

        /// Existing script to copy (skips the editor)
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// List all commands
    List,

    /// Remove a command by its number in `mcmd list`
    Remove {
        /// Command number (prompted when omitted)
        index: Option<usize>,
    },

    /// Run a command; `mcmd exec <name> help` shows its description
    Exec {
        /// Command name
        name: String,

        /// Arguments passed to the command
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Export commands to a shared folder
    Export {
        /// Destination folder (commands go to <dir>/mcmd)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// Import commands from a shared folder
    #[command(alias = "imports")]
    Import {
        /// Source folder (commands are read from <dir>/mcmd)
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Manage settings
    Setting {
        #[command(subcommand)]
        cmd: SettingCommands,
    },

    /// Show paths and auto export status
    Info,
}

#[derive(Subcommand)]
enum SettingCommands {
    /// List all settings
    List,

    /// Show the value of a setting
    Get {
        /// Setting key (dotted for nested settings)
        key: String,
    },

    /// Edit an existing setting
    Edit {
        /// Setting key (dotted for nested settings)
        key: String,

        /// New value
        value: String,
    },

    /// Add settings from another settings file that are missing here
    Merge {
        /// Settings file to take new keys from
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mcmd=debug" } else { "mcmd=warn" };
    let filter = EnvFilter::try_from_env("MCMD_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = cli.home.clone().unwrap_or_else(default_home);

    if let Commands::Init = cli.command {
        return execute_init(InitOptions { home });
    }

    // Everything else needs settings.json
    if !SettingsStore::in_dir(&home).exists() {
        eprintln!(
            "{} No settings.json found in {}",
            style("✗").red(),
            home.display()
        );
        eprintln!("  Run 'mcmd init' to set up mcmd");
        std::process::exit(1);
    }

    let config = Config::load(&home)
        .with_context(|| format!("Failed to load settings from {}", home.display()))?;
    let mut ui = TerminalInteraction::new(config.editor.clone());

    match cli.command {
        Commands::Init => unreachable!("handled above"),

        Commands::Create { name, description, from } => {
            let options = CreateOptions { name, description, from };
            execute_create(options, &config, &mut ui)?;
        }

        Commands::List => {
            execute_list(&config)?;
        }

        Commands::Remove { index } => {
            execute_remove(RemoveOptions { index }, &config, &mut ui)?;
        }

        Commands::Exec { name, args } => {
            execute_exec(ExecOptions { name, args }, &config)?;
        }

        Commands::Export { to } => {
            execute_export(ExportOptions { to }, &config, &mut ui)?;
        }

        Commands::Import { from } => {
            execute_import(ImportOptions { from }, &config, &mut ui)?;
        }

        Commands::Setting { cmd } => {
            let subcommand = match cmd {
                SettingCommands::List => SettingSubcommand::List,
                SettingCommands::Get { key } => SettingSubcommand::Get { key },
                SettingCommands::Edit { key, value } => SettingSubcommand::Edit { key, value },
                SettingCommands::Merge { file } => SettingSubcommand::Merge { file },
            };
            execute_setting(subcommand, &config)?;
        }

        Commands::Info => {
            execute_info(&config)?;
        }
    }

    Ok(())
}
