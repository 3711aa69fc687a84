//! Command interpreter for cmdtool.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name once at startup. Lines come from
//! an interactive line source or a script file, are split on whitespace, and
//! dispatched to the command named by the first word.

mod commands;
mod interpreter;
pub mod logging;
pub mod probe_commands;
pub mod prompt;
pub mod repl;
pub mod script;
mod session;
mod shell;

#[cfg(test)]
pub(crate) mod test_utils;

/// Register the fixed built-in command set into a registry.
pub use commands::register_builtins;
/// A single executable command trait.
pub use interpreter::Command;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// What a command sees while it runs: the registry and the session.
pub use interpreter::Environment;
/// Adapter turning a closure into a `Command`.
pub use interpreter::FnCommand;
/// Prefix filter shared by the registry and line editors.
pub use interpreter::complete_prefix;
/// Whitespace tokenizer used for every input line.
pub use interpreter::tokenize;
/// Switchable log file state and the shared sink behind the logger.
pub use logging::{LogController, LogSettings, LogSink, OffOutcome};
/// Register backend probe commands (probe, play) into a registry.
pub use probe_commands::register_probe_commands;
/// Line source abstraction and the interactive read-dispatch loop.
pub use repl::{LineSource, ReadOutcome, run_interactive};
/// Per-shell mutable state.
pub use session::Session;
/// Registry plus session aggregate.
pub use shell::Shell;
