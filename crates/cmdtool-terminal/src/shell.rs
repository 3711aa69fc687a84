//! The shell aggregate: an immutable registry plus one mutable session.

use std::path::Path;

use cmdtool_types::error::Result;

use crate::commands::register_builtins;
use crate::interpreter::{CommandRegistry, Environment};
use crate::probe_commands::register_probe_commands;
use crate::script::{ScriptSummary, run_script};
use crate::session::Session;

/// One shell instance. Independent instances share nothing.
pub struct Shell {
    registry: CommandRegistry,
    session: Session,
}

impl Shell {
    /// Pair a registry with a session.
    pub fn new(registry: CommandRegistry, session: Session) -> Self {
        Self { registry, session }
    }

    /// A shell with the built-in commands, plus the probe commands when the
    /// session has a backend.
    pub fn with_builtins(session: Session) -> Result<Self> {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry)?;
        if session.backend().is_some() {
            register_probe_commands(&mut registry)?;
        }
        log::debug!("Registered {} commands", registry.len());
        Ok(Self::new(registry, session))
    }

    /// The commands this shell dispatches to.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Dispatch one line. See [`CommandRegistry::dispatch`].
    pub fn dispatch(&mut self, line: &str) -> bool {
        self.registry.dispatch(line, &mut self.session)
    }

    /// Run a script file at the top level.
    pub fn run_script(&mut self, path: &Path) -> Result<ScriptSummary> {
        let mut env = Environment {
            registry: &self.registry,
            session: &mut self.session,
        };
        run_script(&mut env, path)
    }

    /// Whether `quit` has run in this shell.
    pub fn quit_requested(&self) -> bool {
        self.session.quit_requested()
    }
}
