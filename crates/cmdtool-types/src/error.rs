//! Error types for cmdtool.

use std::io;
use std::path::PathBuf;

/// Errors produced by the cmdtool shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("duplicate command: {0}")]
    DuplicateCommand(String),

    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),

    #[error("cannot read script {}: {cause}", path.display())]
    ScriptRead { path: PathBuf, cause: io::Error },

    #[error("script nesting too deep ({depth} levels): {}", path.display())]
    ScriptDepthExceeded { path: PathBuf, depth: usize },

    #[error("{0:?} is an unknown command")]
    UnknownCommand(String),

    #[error("cannot open logfile {}: {cause}", path.display())]
    LogOpen { path: PathBuf, cause: io::Error },

    #[error("argument error: {0}")]
    ArgumentParse(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("input read failure: {0}")]
    ReadFailure(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ShellError>;
