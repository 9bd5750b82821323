#![forbid(unsafe_code)]

//! # mcmd - personal command shortcuts
//!
//! Register shell scripts under short names, run them through one launcher,
//! and carry the collection between machines by exporting to and importing
//! from a shared folder (optionally a git repository).
//!
//! ## Layout
//!
//! ```text
//! ~/.mcmd_commands/
//!   settings.json
//!   build/build.sh
//!   build/build.desc
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use mcmd::{Config, Launcher, Registry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load(&mcmd::config::default_home())?;
//!
//!     for command in Registry::new(&config).list()? {
//!         println!("{} {}", command.index, command.name);
//!     }
//!
//!     Launcher::new(&config).execute("build", &["--release".to_string()])?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod interact;
pub mod launcher;
pub mod provision;
pub mod registry;
pub mod settings;
pub mod sync;

// Re-exports
pub use config::Config;
pub use error::{McmdError, Result, Warned};
pub use interact::{Interaction, TerminalInteraction};
pub use launcher::Launcher;
pub use provision::ScriptSource;
pub use registry::{CommandEntry, CreateOutcome, CreateRequest, Registry};
pub use settings::SettingsStore;
pub use sync::{ExportReport, ImportReport, SourceState, SyncEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
