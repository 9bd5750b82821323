//! Output helpers shared by command handlers

use console::style;

use crate::registry::CommandEntry;

/// Print a numbered table of commands
///
/// ```text
///  No.  Command             Description
///  1    mcmd exec build     runs the build
/// ```
pub fn print_command_table(entries: &[CommandEntry]) {
    let rows: Vec<(String, String, String)> = entries
        .iter()
        .map(|e| {
            (
                e.index.to_string(),
                format!("mcmd exec {}", e.name),
                single_line(&e.display_description()),
            )
        })
        .collect();

    let no_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(3);
    let cmd_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(7);

    println!(
        "{}  {}  {}",
        style(format!("{:<no_width$}", "No.")).blue().bold(),
        style(format!("{:<cmd_width$}", "Command")).blue().bold(),
        style("Description").blue().bold(),
    );
    for (no, cmd, desc) in rows {
        println!(
            "{}  {}  {}",
            style(format!("{:<no_width$}", no)).dim(),
            style(format!("{:<cmd_width$}", cmd)).cyan(),
            desc
        );
    }
}

/// Print non-fatal warnings collected by an operation
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
