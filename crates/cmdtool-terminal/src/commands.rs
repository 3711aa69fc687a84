//! Built-in commands for the cmdtool shell.

use std::path::Path;
use std::time::Duration;

use cmdtool_types::error::{Result, ShellError};

use crate::interpreter::{Command, CommandRegistry, Environment};
use crate::logging::OffOutcome;
use crate::script::run_script;

/// Register the fixed built-in command set into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) -> Result<()> {
    // Shell
    reg.register(Box::new(CommandsCmd))?;
    reg.register(Box::new(HelpCmd))?;
    // Commander
    reg.register(Box::new(LogCmd))?;
    reg.register(Box::new(QuitCmd))?;
    // Scripting
    reg.register(Box::new(ExecuteCmd))?;
    reg.register(Box::new(SleepCmd))?;
    reg.register(Box::new(EchoCmd))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// commands / help
// ---------------------------------------------------------------------------

struct CommandsCmd;
impl Command for CommandsCmd {
    fn name(&self) -> &str {
        "commands"
    }
    fn usage(&self) -> &str {
        "commands  \n\t commands shows all commands\n"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        let listing = env.registry.help_listing();
        env.session.write_text(&listing);
        Ok(())
    }
}

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn usage(&self) -> &str {
        "help  \n\t help shows all commands\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        CommandsCmd.execute(args, env)
    }
}

// ---------------------------------------------------------------------------
// log
// ---------------------------------------------------------------------------

const LOG_USAGE: &str = "log (on <filename>) | off";

struct LogCmd;
impl Command for LogCmd {
    fn name(&self) -> &str {
        "log"
    }
    fn usage(&self) -> &str {
        "log (on <filename>)|off \n\t log starts or stops writing logging output in the specified file\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        match args {
            ["on", rest @ ..] => {
                let explicit = rest.first().map(Path::new);
                if let Some(file) = explicit {
                    log::info!("Switch to logging by command to {:?}", file.display());
                }
                let path = env.session.log_mut().turn_on(explicit)?;
                log::info!("Start logging by command to {:?}", path.display());
                env.session
                    .println(&format!("Start logging to {:?}", path.display().to_string()));
                Ok(())
            },
            ["off", ..] => {
                log::info!("Stop logging by command");
                match env.session.log_mut().turn_off()? {
                    OffOutcome::AlreadyOff => env.session.println("log: logging is already off"),
                    OffOutcome::Closed(path) => {
                        env.session
                            .println(&format!("Stop logging to {:?}", path.display().to_string()));
                    },
                    OffOutcome::Reopened { closed, reopened } => {
                        log::info!("Switch back from logging by command to {:?}", closed.display());
                        env.session.println(&format!(
                            "Switch logging to {:?}",
                            reopened.display().to_string()
                        ));
                    },
                }
                Ok(())
            },
            _ => Err(ShellError::Usage(LOG_USAGE.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// quit
// ---------------------------------------------------------------------------

struct QuitCmd;
impl Command for QuitCmd {
    fn name(&self) -> &str {
        "quit"
    }
    fn usage(&self) -> &str {
        "quit  \n\t close the session and exit\n"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        log::info!("Quit by command");
        env.session.request_quit();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

struct ExecuteCmd;
impl Command for ExecuteCmd {
    fn name(&self) -> &str {
        "execute"
    }
    fn usage(&self) -> &str {
        "execute file \n\t execute execute the commands in the file line by line, '#' is comment\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        let path = args
            .first()
            .ok_or_else(|| ShellError::Usage("execute <file>".to_string()))?;
        run_script(env, Path::new(path))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// sleep
// ---------------------------------------------------------------------------

struct SleepCmd;
impl Command for SleepCmd {
    fn name(&self) -> &str {
        "sleep"
    }
    fn usage(&self) -> &str {
        "sleep seconds \n\t sleep sleeps for seconds\n"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<()> {
        let secs = parse_seconds(args.first().copied())?;
        log::debug!("Sleep {secs}s");
        std::thread::sleep(Duration::from_secs(secs));
        Ok(())
    }
}

/// Seconds for `sleep`: one when omitted, else a non-negative integer.
fn parse_seconds(arg: Option<&str>) -> Result<u64> {
    match arg {
        None => Ok(1),
        Some(s) => s.parse::<u64>().map_err(|_| {
            ShellError::ArgumentParse(format!("sleep: {s:?} is not a non-negative integer"))
        }),
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn usage(&self) -> &str {
        "echo text_w/o_linebreak \n\t echo prints rest of line\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        env.session.println(&args.join(" "));
        Ok(())
    }
}
