//! Commands
//!
//! CLI command implementations. Each command is in its own submodule and
//! prints its results; the library types underneath stay presentation-free.

pub mod create;
pub mod exec;
pub mod info;
pub mod init;
pub mod list;
pub mod output;
pub mod remove;
pub mod setting;
pub mod sync;

pub use create::{execute_create, CreateOptions};
pub use exec::{execute_exec, ExecOptions};
pub use info::execute_info;
pub use init::{execute_init, InitOptions};
pub use list::execute_list;
pub use output::{print_command_table, print_warnings};
pub use remove::{execute_remove, RemoveOptions};
pub use setting::{execute_setting, SettingSubcommand};
pub use sync::{execute_export, execute_import, ExportOptions, ImportOptions};
