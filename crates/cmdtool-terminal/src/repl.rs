//! Interactive read-dispatch loop.
//!
//! The loop is written against [`LineSource`] so the binary can plug in a
//! line editor while tests feed canned input.

use cmdtool_types::error::Result;

use crate::prompt::interactive_prompt;
use crate::shell::Shell;

/// One read from a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The user aborted the current line (Ctrl-C).
    Interrupted,
    /// End of input (Ctrl-D or a closed stream).
    Eof,
}

/// Where interactive lines come from.
pub trait LineSource {
    /// Show `prompt` and read one line. Errors other than end-of-input are
    /// fatal to the loop.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;

    /// Record a recognized line for recall.
    fn add_history(&mut self, line: &str);
}

/// Read lines until end of input or `quit`, dispatching each one.
///
/// Only lines that reached a handler are added to history.
pub fn run_interactive(shell: &mut Shell, source: &mut dyn LineSource) -> Result<()> {
    while !shell.quit_requested() {
        let prompt = interactive_prompt(shell.session().name());
        match source.read_line(&prompt)? {
            ReadOutcome::Line(line) => {
                if shell.dispatch(&line) {
                    source.add_history(&line);
                }
            },
            ReadOutcome::Interrupted => continue,
            ReadOutcome::Eof => {
                log::info!("End of input");
                break;
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use cmdtool_types::error::ShellError;

    use super::*;
    use crate::test_utils::test_session;

    /// Feeds canned reads and records prompts and history.
    #[derive(Default)]
    struct ScriptedSource {
        reads: VecDeque<Result<ReadOutcome>>,
        prompts: Vec<String>,
        history: Vec<String>,
    }

    impl ScriptedSource {
        fn lines(lines: &[&str]) -> Self {
            Self {
                reads: lines
                    .iter()
                    .map(|l| Ok(ReadOutcome::Line(l.to_string())))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl LineSource for ScriptedSource {
        fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
            self.prompts.push(prompt.to_string());
            self.reads.pop_front().unwrap_or(Ok(ReadOutcome::Eof))
        }
        fn add_history(&mut self, line: &str) {
            self.history.push(line.to_string());
        }
    }

    fn shell() -> (Shell, crate::test_utils::SharedBuffer) {
        let (session, out) = test_session();
        (Shell::with_builtins(session).unwrap(), out)
    }

    #[test]
    fn eof_ends_loop_successfully() {
        let (mut shell, out) = shell();
        let mut source = ScriptedSource::default();
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(source.prompts.len(), 1);
        assert_eq!(out.contents(), "");
    }

    #[test]
    fn only_recognized_lines_enter_history() {
        let (mut shell, _out) = shell();
        let mut source = ScriptedSource::lines(&["echo hi", "", "bogus", "sleep 0", "   "]);
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(source.history, ["echo hi", "sleep 0"]);
    }

    #[test]
    fn failing_handler_still_enters_history() {
        let (mut shell, out) = shell();
        let mut source = ScriptedSource::lines(&["sleep abc"]);
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(source.history, ["sleep abc"]);
        assert!(out.contents().starts_with("error: argument error"));
    }

    #[test]
    fn quit_stops_reading() {
        let (mut shell, out) = shell();
        let mut source = ScriptedSource::lines(&["echo one", "quit", "echo two"]);
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(out.contents(), "one\n");
        assert_eq!(source.prompts.len(), 2);
        assert_eq!(source.history, ["echo one", "quit"]);
    }

    #[test]
    fn interrupt_prompts_again() {
        let (mut shell, out) = shell();
        let mut source = ScriptedSource {
            reads: VecDeque::from([
                Ok(ReadOutcome::Interrupted),
                Ok(ReadOutcome::Line("echo back".into())),
            ]),
            ..ScriptedSource::default()
        };
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(out.contents(), "back\n");
        assert_eq!(source.prompts.len(), 3);
    }

    #[test]
    fn read_failure_is_fatal() {
        let (mut shell, _out) = shell();
        let mut source = ScriptedSource {
            reads: VecDeque::from([
                Err(ShellError::ReadFailure("terminal gone".into())),
                Ok(ReadOutcome::Line("echo never".into())),
            ]),
            ..ScriptedSource::default()
        };
        let err = run_interactive(&mut shell, &mut source).unwrap_err();
        assert!(matches!(err, ShellError::ReadFailure(_)));
        assert_eq!(source.reads.len(), 1);
    }

    #[test]
    fn prompt_names_session() {
        let (mut shell, _out) = shell();
        let mut source = ScriptedSource::default();
        run_interactive(&mut shell, &mut source).unwrap();
        assert!(source.prompts[0].ends_with(" test> "));
    }

    #[test]
    fn unknown_input_prints_listing() {
        let (mut shell, out) = shell();
        let mut source = ScriptedSource::lines(&["frobnicate"]);
        run_interactive(&mut shell, &mut source).unwrap();
        assert_eq!(out.contents(), shell.registry().help_listing());
    }
}
