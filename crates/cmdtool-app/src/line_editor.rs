//! rustyline-backed line source with command-name completion.

use std::io::ErrorKind;
use std::path::PathBuf;

use cmdtool_terminal::{LineSource, ReadOutcome, complete_prefix};
use cmdtool_types::error::{Result, ShellError};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

/// Completes the text before the cursor against the registered names.
pub struct CommandHelper {
    names: Vec<String>,
}

impl CommandHelper {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    fn candidates(&self, before_cursor: &str) -> Vec<Pair> {
        complete_prefix(&self.names, before_cursor)
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect()
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, self.candidates(&line[..pos])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

impl Helper for CommandHelper {}

/// Interactive line source over a rustyline editor.
pub struct LineEditor {
    editor: Editor<CommandHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
}

impl LineEditor {
    pub fn new(names: Vec<String>, history_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = Config::builder()
            .completion_type(CompletionType::List)
            .auto_add_history(false)
            .build();
        let mut editor: Editor<CommandHelper, DefaultHistory> = Editor::with_config(config)
            .map_err(|e| anyhow::anyhow!("failed to init rustyline: {e}"))?;
        editor.set_helper(Some(CommandHelper::new(names)));

        if let Some(path) = &history_file {
            match editor.load_history(path) {
                Ok(()) => log::debug!("Loaded history from {}", path.display()),
                Err(ReadlineError::Io(e)) if e.kind() == ErrorKind::NotFound => {},
                Err(e) => log::warn!("Cannot load history {}: {e}", path.display()),
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }

    /// Write history back to the configured file, if any.
    pub fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                log::warn!("Cannot save history {}: {e}", path.display());
            }
        }
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(ShellError::ReadFailure(e.to_string())),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            log::warn!("Cannot record history: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> CommandHelper {
        CommandHelper::new(vec!["log".into(), "quit".into(), "sleep".into()])
    }

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn completes_single_match() {
        assert_eq!(replacements(helper().candidates("s")), ["sleep"]);
    }

    #[test]
    fn empty_prefix_offers_everything() {
        assert_eq!(replacements(helper().candidates("")), ["log", "quit", "sleep"]);
    }

    #[test]
    fn no_match_after_arguments() {
        assert!(helper().candidates("log o").is_empty());
    }
}
