//! Command trait, registry, and dispatch logic.
//!
//! Lines are split on runs of whitespace with no quoting or escaping. The
//! first word names the command, the rest are passed through untouched.

use std::collections::HashMap;

use cmdtool_types::error::{Result, ShellError};

use crate::session::Session;

/// Shared state passed to every command.
pub struct Environment<'a> {
    /// The registry the command was dispatched from. Scripts dispatch
    /// nested lines through it.
    pub registry: &'a CommandRegistry,
    /// The running session.
    pub session: &'a mut Session,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Help text for the command listing, printed verbatim.
    fn usage(&self) -> &str;

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()>;
}

/// A command backed by a closure.
pub struct FnCommand<F> {
    name: String,
    usage: String,
    handler: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<()>,
{
    pub fn new(name: impl Into<String>, usage: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            handler,
        }
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&[&str], &mut Environment<'_>) -> Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }
    fn usage(&self) -> &str {
        &self.usage
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        (self.handler)(args, env)
    }
}

/// Registry of available commands with dispatch.
///
/// Keeps the command names in a sorted cache that is updated on every
/// registration, so listings and completions never need to sort.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    sorted: Vec<String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Names must be unique and free of whitespace.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name().to_string();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ShellError::InvalidCommandName(name));
        }
        if self.commands.contains_key(&name) {
            return Err(ShellError::DuplicateCommand(name));
        }
        if let Err(pos) = self.sorted.binary_search(&name) {
            self.sorted.insert(pos, name.clone());
        }
        self.commands.insert(name, cmd);
        Ok(())
    }

    /// Register a closure as a command.
    pub fn register_fn<F>(&mut self, name: &str, usage: &str, handler: F) -> Result<()>
    where
        F: Fn(&[&str], &mut Environment<'_>) -> Result<()> + 'static,
    {
        self.register(Box::new(FnCommand::new(name, usage, handler)))
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Command names in ascending lexicographic order.
    pub fn sorted_names(&self) -> &[String] {
        &self.sorted
    }

    /// The stored help text of one command.
    pub fn help_text(&self, name: &str) -> Option<&str> {
        self.commands.get(name).map(|c| c.usage())
    }

    /// Every command's help text in sorted name order, one per line.
    pub fn help_listing(&self) -> String {
        let mut out = String::new();
        for name in &self.sorted {
            if let Some(cmd) = self.commands.get(name) {
                out.push_str(cmd.usage());
                out.push('\n');
            }
        }
        out
    }

    /// Return every command name starting with `prefix`, in sorted order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        complete_prefix(&self.sorted, prefix)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Tokenize and dispatch one line.
    ///
    /// Returns `false` for empty lines and unknown commands (which print the
    /// help listing), `true` whenever a handler ran. Handler errors are
    /// reported here and never propagate.
    pub fn dispatch(&self, line: &str, session: &mut Session) -> bool {
        let tokens = tokenize(line);
        let Some((&name, args)) = tokens.split_first() else {
            return false;
        };

        let Some(cmd) = self.commands.get(name) else {
            log::debug!("Unknown command {name:?}");
            let listing = self.help_listing();
            session.write_text(&listing);
            return false;
        };

        log::debug!("CMD: {}", tokens.join(" "));
        let mut env = Environment {
            registry: self,
            session,
        };
        if let Err(e) = cmd.execute(args, &mut env) {
            log::debug!("{name}: {e}");
            env.session.println(&format!("error: {e}"));
        }
        true
    }
}

/// Split a line on runs of whitespace.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Filter sorted `names` down to those starting with `prefix`.
pub fn complete_prefix(names: &[String], prefix: &str) -> Vec<String> {
    names
        .iter()
        .filter(|name| name.starts_with(prefix))
        .cloned()
        .collect()
}
