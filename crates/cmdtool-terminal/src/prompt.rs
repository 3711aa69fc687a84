//! Prompt strings for interactive input and echoed script lines.

use std::path::Path;

use chrono::{DateTime, Local};

/// Timestamp shown in prompts, e.g. `Jan 2 15:04:05.000`.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%b %-d %H:%M:%S%.3f").to_string()
}

/// `< <timestamp> <name>> `
pub fn interactive_prompt(name: &str) -> String {
    format!("< {} {name}> ", timestamp(Local::now()))
}

/// `<<timestamp> "<script-path>"> `
pub fn script_prompt(path: &Path) -> String {
    format!(
        "<{} {:?}> ",
        timestamp(Local::now()),
        path.display().to_string()
    )
}
