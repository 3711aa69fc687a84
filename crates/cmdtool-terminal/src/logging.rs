//! Session log control.
//!
//! Diagnostic output goes through one [`LogSink`] handle shared with the
//! process logger. The [`LogController`] swaps the file behind that handle,
//! so every component sees a `log on` / `log off` without tracking any state
//! itself. While no file is active the sink writes to standard error.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use cmdtool_types::error::{Result, ShellError};

struct ActiveLog {
    path: PathBuf,
    file: File,
}

/// Writable handle to the current log destination.
///
/// Cloning is cheap; all clones point at the same destination.
#[derive(Clone, Default)]
pub struct LogSink {
    inner: Arc<Mutex<Option<ActiveLog>>>,
}

impl LogSink {
    fn lock(&self) -> MutexGuard<'_, Option<ActiveLog>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Path of the file currently receiving output.
    pub fn active_path(&self) -> Option<PathBuf> {
        self.lock().as_ref().map(|a| a.path.clone())
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.lock().as_mut() {
            Some(active) => active.file.write(buf),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(active) => active.file.flush(),
            None => io::stderr().flush(),
        }
    }
}

/// Startup choices that decide the default log file.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Session name used in synthesized file names.
    pub session_name: String,
    /// Directory for synthesized file names.
    pub log_dir: PathBuf,
    /// Keep a default log open whenever no explicit one is.
    pub always_log: bool,
    /// Explicit default log file; implies default logging.
    pub default_file: Option<PathBuf>,
}

impl LogSettings {
    /// Settings with default logging disabled.
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            log_dir: PathBuf::from("."),
            always_log: false,
            default_file: None,
        }
    }

    /// Whether a default log should be kept open.
    pub fn default_logging(&self) -> bool {
        self.always_log || self.default_file.is_some()
    }
}

/// Result of a `turn_off` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffOutcome {
    /// Nothing was open.
    AlreadyOff,
    /// The file was closed and logging is now off.
    Closed(PathBuf),
    /// The file was closed and the default log reopened at the given path.
    Reopened { closed: PathBuf, reopened: PathBuf },
}

/// Owner of the session's log file.
pub struct LogController {
    sink: LogSink,
    settings: LogSettings,
    files_opened: usize,
}

impl LogController {
    pub fn new(settings: LogSettings) -> Self {
        Self {
            sink: LogSink::default(),
            settings,
            files_opened: 0,
        }
    }

    /// A handle for installing as the logger target.
    pub fn sink(&self) -> LogSink {
        self.sink.clone()
    }

    pub fn settings(&self) -> &LogSettings {
        &self.settings
    }

    pub fn is_on(&self) -> bool {
        self.sink.lock().is_some()
    }

    pub fn active_path(&self) -> Option<PathBuf> {
        self.sink.active_path()
    }

    /// Number of log files opened over the controller's lifetime.
    pub fn files_opened(&self) -> usize {
        self.files_opened
    }

    /// `<session>-<YYYYMMDDHHMMSS>.log` inside the log directory.
    pub fn synthesize_name(&self, now: DateTime<Local>) -> PathBuf {
        self.settings.log_dir.join(format!(
            "{}-{}.log",
            self.settings.session_name,
            now.format("%Y%m%d%H%M%S")
        ))
    }

    /// The file the default log should go to, if default logging is on.
    pub fn default_target(&self) -> Option<PathBuf> {
        if let Some(path) = &self.settings.default_file {
            return Some(path.clone());
        }
        self.settings
            .always_log
            .then(|| self.synthesize_name(Local::now()))
    }

    /// Open the default log at startup, if one is configured.
    pub fn start_default(&mut self) -> Result<Option<PathBuf>> {
        match self.default_target() {
            Some(path) => self.turn_on(Some(&path)).map(Some),
            None => Ok(None),
        }
    }

    /// Redirect diagnostic output to `explicit`, or to a synthesized name.
    ///
    /// The new file is opened before anything is released, so a failure
    /// leaves the current state untouched. On success the previous file, if
    /// any, is closed.
    pub fn turn_on(&mut self, explicit: Option<&Path>) -> Result<PathBuf> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => self.synthesize_name(Local::now()),
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|cause| ShellError::LogOpen {
                path: path.clone(),
                cause,
            })?;

        let previous = self.sink.lock().replace(ActiveLog {
            path: path.clone(),
            file,
        });
        self.files_opened += 1;
        if let Some(prev) = previous {
            close(prev);
        }
        Ok(path)
    }

    /// Close the active log. If default logging is configured, a fresh
    /// default log is opened right away.
    pub fn turn_off(&mut self) -> Result<OffOutcome> {
        let Some(active) = self.sink.lock().take() else {
            return Ok(OffOutcome::AlreadyOff);
        };
        let closed = active.path.clone();
        close(active);

        match self.default_target() {
            Some(target) => {
                let reopened = self.turn_on(Some(&target))?;
                Ok(OffOutcome::Reopened { closed, reopened })
            },
            None => Ok(OffOutcome::Closed(closed)),
        }
    }

    /// Close the active log without reopening anything.
    pub fn shutdown(&mut self) {
        if let Some(active) = self.sink.lock().take() {
            close(active);
        }
    }
}

impl Drop for LogController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn close(mut active: ActiveLog) {
    // The file handle is released when `active` drops.
    let _ = active.file.flush();
}
