//! Backend probe terminal commands.
//!
//! Only registered when the session has a backend. Both commands default to
//! the `commands` request.

use cmdtool_types::error::{Result, ShellError};
use cmdtool_types::probe::{ProbeResponse, render_tree, render_walk};

use crate::interpreter::{Command, CommandRegistry, Environment};

const DEFAULT_REQUEST: &str = "commands";

/// Register backend probe commands.
pub fn register_probe_commands(reg: &mut CommandRegistry) -> Result<()> {
    reg.register(Box::new(ProbeCmd))?;
    reg.register(Box::new(PlayCmd))?;
    Ok(())
}

fn query(args: &[&str], env: &Environment<'_>) -> Result<(String, ProbeResponse)> {
    let request = args.first().copied().unwrap_or(DEFAULT_REQUEST);
    let backend = env
        .session
        .backend()
        .ok_or_else(|| ShellError::Backend("no backend configured".to_string()))?;
    log::info!("CMD: probe {request} at {}", backend.endpoint());
    let response = backend.query(request)?;
    Ok((request.to_string(), response))
}

// ---------------------------------------------------------------------------
// probe
// ---------------------------------------------------------------------------

struct ProbeCmd;
impl Command for ProbeCmd {
    fn name(&self) -> &str {
        "probe"
    }
    fn usage(&self) -> &str {
        "probe [request] \n\t probe prints the backend's answer to request (default: commands) as indented JSON\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        let (request, response) = query(args, env)?;
        let text = render_tree(&request, &response)?;
        env.session.println(&text);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

struct PlayCmd;
impl Command for PlayCmd {
    fn name(&self) -> &str {
        "play"
    }
    fn usage(&self) -> &str {
        "play [request] \n\t play walks the backend's answer to request and describes each entry\n"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<()> {
        let (_, response) = query(args, env)?;
        let text = render_walk(&response);
        env.session.write_text(&text);
        Ok(())
    }
}
