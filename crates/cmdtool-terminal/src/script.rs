//! Script runner.
//!
//! A script is a flat list of command lines: no variables, no control flow.
//! Blank lines and lines whose first non-blank character is `#` are skipped.
//! Every other line is echoed behind a script prompt and then dispatched.
//! Unknown or failing lines are reported and the script carries on.

use std::path::Path;

use cmdtool_types::error::{Result, ShellError};

use crate::interpreter::{Environment, tokenize};
use crate::prompt::script_prompt;

/// What happened while running one script file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Lines dispatched to a registered command.
    pub executed: usize,
    /// Lines whose first word is not a registered command.
    pub unknown: usize,
    /// Blank and comment lines.
    pub skipped: usize,
    /// A `quit` stopped the script before its end.
    pub quit: bool,
}

/// Run the script at `path` through the environment's registry.
pub fn run_script(env: &mut Environment<'_>, path: &Path) -> Result<ScriptSummary> {
    let depth = env.session.script_depth();
    if depth >= env.session.max_script_depth() {
        return Err(ShellError::ScriptDepthExceeded {
            path: path.to_path_buf(),
            depth,
        });
    }

    let bytes = std::fs::read(path).map_err(|cause| ShellError::ScriptRead {
        path: path.to_path_buf(),
        cause,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    log::info!("Execute script {:?} (depth {})", path.display(), depth + 1);
    env.session.enter_script();
    let summary = run_lines(env, path, &text);
    env.session.leave_script();
    log::info!(
        "Script {:?} done: {} executed, {} unknown",
        path.display(),
        summary.executed,
        summary.unknown
    );
    Ok(summary)
}

fn run_lines(env: &mut Environment<'_>, path: &Path, text: &str) -> ScriptSummary {
    let mut summary = ScriptSummary::default();

    for line in text.split('\n') {
        if env.session.quit_requested() {
            summary.quit = true;
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            summary.skipped += 1;
            continue;
        }

        let tokens = tokenize(line);
        env.session
            .println(&format!("{}{}", script_prompt(path), tokens.join(" ")));

        let name = tokens[0];
        if env.registry.contains(name) {
            env.registry.dispatch(line, env.session);
            summary.executed += 1;
        } else {
            let err = ShellError::UnknownCommand(name.to_string());
            log::debug!("{}: {err}", path.display());
            env.session.println(&format!("error: {err}"));
            summary.unknown += 1;
        }
    }

    if env.session.quit_requested() {
        summary.quit = true;
    }
    summary
}
