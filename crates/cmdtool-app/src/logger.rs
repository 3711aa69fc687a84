//! `env_logger` installation.
//!
//! Records go through the session's [`LogSink`], so `log on` / `log off`
//! redirect every subsequent record without reinstalling the logger.

use std::io::Write;

use chrono::{DateTime, Local};
use cmdtool_terminal::LogSink;
use env_logger::{Builder, Env, Target};

/// Install the global logger. `RUST_LOG` wins over `filter`.
pub fn init(sink: LogSink, filter: &str) -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or(filter))
        .format(|buf, record| {
            let line = format_line(
                Local::now(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                &record.args().to_string(),
            );
            writeln!(buf, "{line}")
        })
        .target(Target::Pipe(Box::new(sink)))
        .try_init()?;
    Ok(())
}

/// `YYYY/MM/DD HH:MM:SS file:line: message`
fn format_line(now: DateTime<Local>, file: &str, line: u32, message: &str) -> String {
    format!(
        "{} {}:{}: {}",
        now.format("%Y/%m/%d %H:%M:%S"),
        short_file(file),
        line,
        message
    )
}

/// Last path component of a source file name.
fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
