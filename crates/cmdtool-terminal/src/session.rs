//! Per-shell mutable state.

use std::io::{self, Write};

use cmdtool_types::config::DEFAULT_MAX_SCRIPT_DEPTH;
use cmdtool_types::probe::BackendProbe;

use crate::logging::LogController;

/// Mutable state shared by every command of one shell.
pub struct Session {
    name: String,
    log: LogController,
    out: Box<dyn Write>,
    quit_requested: bool,
    script_depth: usize,
    max_script_depth: usize,
    backend: Option<Box<dyn BackendProbe>>,
}

impl Session {
    /// A session writing to standard output.
    pub fn new(name: impl Into<String>, log: LogController) -> Self {
        Self {
            name: name.into(),
            log,
            out: Box::new(io::stdout()),
            quit_requested: false,
            script_depth: 0,
            max_script_depth: DEFAULT_MAX_SCRIPT_DEPTH,
            backend: None,
        }
    }

    /// Send command output somewhere other than standard output.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    /// Bound on nested `execute` calls.
    pub fn with_max_script_depth(mut self, depth: usize) -> Self {
        self.max_script_depth = depth;
        self
    }

    /// Attach a backend; enables the probe commands.
    pub fn with_backend(mut self, backend: Box<dyn BackendProbe>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// The session name shown in prompts.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The session's log file controller.
    pub fn log(&self) -> &LogController {
        &self.log
    }

    /// Mutable access to the log controller, for `log on` / `log off`.
    pub fn log_mut(&mut self) -> &mut LogController {
        &mut self.log
    }

    /// The configured backend, if any.
    pub fn backend(&self) -> Option<&dyn BackendProbe> {
        self.backend.as_deref()
    }

    /// Write text to the session output as is.
    pub fn write_text(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            log::warn!("output write failed: {e}");
        }
    }

    /// Write one line to the session output.
    pub fn println(&mut self, line: &str) {
        self.write_text(&format!("{line}\n"));
    }

    /// Ask the running loop (and any running scripts) to stop.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether `quit` has run.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Number of scripts currently running, outermost included.
    pub fn script_depth(&self) -> usize {
        self.script_depth
    }

    /// Maximum allowed [`script_depth`](Self::script_depth).
    pub fn max_script_depth(&self) -> usize {
        self.max_script_depth
    }

    pub(crate) fn enter_script(&mut self) {
        self.script_depth += 1;
    }

    pub(crate) fn leave_script(&mut self) {
        self.script_depth = self.script_depth.saturating_sub(1);
    }
}
