//! cmdtool entry point.
//!
//! Opens a named session, optionally starts the default log, then either runs
//! one script (`--execute`) or reads commands interactively until `quit` or
//! end of input.

mod line_editor;
mod logger;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use cmdtool_net::HttpProbe;
use cmdtool_terminal::{LogController, LogSettings, Session, Shell, run_interactive};
use cmdtool_types::config::{BackendConfig, ShellConfig};
use line_editor::LineEditor;

#[derive(Parser, Debug)]
#[command(name = "cmdtool", version, about = "Interactive command shell with scripting and switchable logging")]
struct Cli {
    /// Session name, shown in the prompt and used for log file names
    name: String,

    /// Keep a default log file open
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    log: bool,

    /// Explicit default log file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend probe address (host:port); enables `probe` and `play`
    #[arg(long, value_name = "ADDR")]
    backend: Option<String>,

    /// Run a script and exit
    #[arg(long, value_name = "PATH")]
    execute: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    let log_controller = LogController::new(log_settings(&cli, &config));
    logger::init(log_controller.sink(), &config.log_filter).context("failed to install logger")?;
    run_session(&cli, &config, log_controller)
}

/// Everything after logger installation: default log, shell, then batch or
/// interactive input.
fn run_session(cli: &Cli, config: &ShellConfig, mut log_controller: LogController) -> Result<()> {
    if let Some(path) = log_controller.start_default()? {
        println!("Start logging to {:?}", path.display().to_string());
    }
    log::info!("Session starting");

    let mut session =
        Session::new(cli.name.clone(), log_controller).with_max_script_depth(config.max_script_depth);
    if let Some(backend) = backend_config(config, cli.backend.as_deref()) {
        log::info!("Backend probe at {}", backend.address);
        session = session.with_backend(Box::new(HttpProbe::new(&backend)?));
    }
    let mut shell = Shell::with_builtins(session)?;

    let result = match &cli.execute {
        Some(script) => shell.run_script(script).map(|summary| {
            log::info!(
                "Batch run finished: {} executed, {} unknown",
                summary.executed,
                summary.unknown
            );
        }),
        None => {
            let names = shell.registry().sorted_names().to_vec();
            let mut editor = LineEditor::new(names, config.history_file.clone())?;
            let result = run_interactive(&mut shell, &mut editor);
            editor.save_history();
            result
        },
    };

    log::info!("Session ending");
    shell.session_mut().log_mut().shutdown();
    result?;
    Ok(())
}

fn log_settings(cli: &Cli, config: &ShellConfig) -> LogSettings {
    LogSettings {
        session_name: cli.name.clone(),
        log_dir: config.log_dir.clone(),
        always_log: cli.log,
        default_file: cli.log_file.clone(),
    }
}

/// Backend settings from the config file, with `--backend` overriding the
/// address.
fn backend_config(config: &ShellConfig, cli_address: Option<&str>) -> Option<BackendConfig> {
    match (config.backend.clone(), cli_address) {
        (Some(mut backend), Some(address)) => {
            backend.address = address.to_string();
            Some(backend)
        },
        (None, Some(address)) => Some(BackendConfig::new(address)),
        (backend, None) => backend,
    }
}
