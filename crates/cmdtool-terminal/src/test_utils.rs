//! Shared helpers for unit tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::{Mutex, Once, PoisonError};
use std::thread::{self, ThreadId};

use crate::logging::{LogController, LogSettings};
use crate::session::Session;

/// In-memory writer whose contents stay readable after it is boxed.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session named `test` with logging off and captured output.
pub fn test_session() -> (Session, SharedBuffer) {
    let out = SharedBuffer::default();
    let session = Session::new("test", LogController::new(LogSettings::new("test")))
        .with_output(Box::new(out.clone()));
    (session, out)
}

/// Strip a leading prompt (everything up to the first `> `) from an echoed
/// line.
pub fn strip_prompt(line: &str) -> &str {
    line.split_once("> ").map_or(line, |(_, rest)| rest)
}

/// Global logger keeping every record with the thread that emitted it.
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, log::Level, String)>>,
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((thread::current().id(), record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Run `f` and return the log records it emitted on this thread.
pub fn capture_logs(f: impl FnOnce()) -> Vec<(log::Level, String)> {
    INSTALL.call_once(|| {
        if log::set_logger(&CAPTURE).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }
    });
    let me = thread::current().id();
    let start = CAPTURE.records.lock().unwrap_or_else(PoisonError::into_inner).len();
    f();
    CAPTURE
        .records
        .lock()
        .unwrap_or_else(PoisonError::into_inner)[start..]
        .iter()
        .filter(|(id, _, _)| *id == me)
        .map(|(_, level, msg)| (*level, msg.clone()))
        .collect()
}
