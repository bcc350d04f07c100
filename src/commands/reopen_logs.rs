//! Reopen-logs command handler
//!
//! Provides `passenger-config reopen-logs`, run after log rotation. The
//! watchdog owns the log file and reopens it by path; the core and UstRouter
//! agents inherited their descriptor from the watchdog and are told to
//! reinherit the freshly opened one. Steps run strictly in order and the
//! first failure stops the command.

use log::{debug, info};
use std::io::Write;

use crate::admin::{AdminRequest, AdminResponse, AdminSocket, AgentErrorBody};
use crate::cli::{Cli, ReopenLogsArgs};
use crate::config::defaults::{AGENT_EXE, PROGRAM_NAME};
use crate::config::sockets;
use crate::error::{error_chain, PassengerError, Result};
use crate::instance::{select_instance, InstanceRegistry};

/// How an agent picks up the rotated log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogAction {
    /// Close and reopen the log file by path
    Reopen,
    /// Adopt the descriptor the watchdog just reopened
    Reinherit,
}

/// One agent to notify
#[derive(Debug, Clone, Copy)]
struct LogStep {
    agent: &'static str,
    socket: &'static str,
    action: LogAction,
}

impl LogStep {
    fn path(&self) -> &'static str {
        match self.action {
            LogAction::Reopen => sockets::REOPEN_LOGS_PATH,
            LogAction::Reinherit => sockets::REINHERIT_LOGS_PATH,
        }
    }

    fn announcement(&self) -> String {
        match self.action {
            LogAction::Reopen => format!("Reopening logs for {} {}", PROGRAM_NAME, self.agent),
            LogAction::Reinherit => format!(
                "Reopen logs for {} {} (through reinheritance)",
                AGENT_EXE, self.agent
            ),
        }
    }
}

/// Watchdog first: the agents reinherit what it reopened
const STEPS: [LogStep; 3] = [
    LogStep {
        agent: "watchdog",
        socket: sockets::WATCHDOG,
        action: LogAction::Reopen,
    },
    LogStep {
        agent: "core",
        socket: sockets::CORE,
        action: LogAction::Reinherit,
    },
    LogStep {
        agent: "UstRouter",
        socket: sockets::UST_ROUTER,
        action: LogAction::Reinherit,
    },
];

/// Run the reopen-logs command
pub async fn run_reopen_logs_command(cli: &Cli, args: &ReopenLogsArgs) -> Result<()> {
    let registry = InstanceRegistry::from_env();
    let instance = select_instance(
        &registry,
        args.instance.as_deref(),
        cli.command.name(),
        cli.batch,
    )?;

    info!(
        "Selected instance '{}' at {}",
        instance.name(),
        instance.dir().display()
    );

    perform_reopen_logs(&instance, args, &mut std::io::stdout()).await
}

/// Notify the watchdog and agents in order, writing progress to `out`
pub async fn perform_reopen_logs<S, W>(
    socket: &S,
    args: &ReopenLogsArgs,
    out: &mut W,
) -> Result<()>
where
    S: AdminSocket,
    W: Write,
{
    for step in &STEPS {
        writeln!(out, "{}", step.announcement())?;
        out.flush()?;
        perform_step(socket, step, args.ignore_logs_not_available).await?;
    }

    writeln!(out, "All done")?;
    Ok(())
}

async fn perform_step<S: AdminSocket>(
    socket: &S,
    step: &LogStep,
    ignore_no_log_file: bool,
) -> Result<()> {
    let mut request = AdminRequest::post(step.path()).json();
    if let Some(credentials) = socket.credentials() {
        debug!("Authenticating as '{}'", credentials.user());
        request = request.basic_auth(credentials);
    }

    let response = socket
        .request(step.socket, request)
        .await
        .map_err(|e| match e {
            PassengerError::Transport { status, body, .. } => PassengerError::Transport {
                target: step.agent.to_string(),
                status,
                body,
            },
            PassengerError::Http(e) => PassengerError::Transport {
                target: step.agent.to_string(),
                status: None,
                body: error_chain(&e),
            },
            other => other,
        })?;

    debug!(
        "{} answered {} ({})",
        step.agent,
        response.status,
        response.content_type().unwrap_or("no content type")
    );

    check_response(step.agent, &response, ignore_no_log_file)
}

/// Interpret an agent's answer to a reopen/reinherit request
fn check_response(agent: &str, response: &AdminResponse, ignore_no_log_file: bool) -> Result<()> {
    if response.status == 401 {
        return Err(PassengerError::Unauthorized);
    }

    if !response.is_json() {
        return Err(PassengerError::Transport {
            target: agent.to_string(),
            status: Some(response.status),
            body: response.body_text(),
        });
    }

    if response.is_success() {
        return Ok(());
    }

    let error: AgentErrorBody =
        serde_json::from_slice(&response.body).map_err(|_| PassengerError::Transport {
            target: agent.to_string(),
            status: Some(response.status),
            body: response.body_text(),
        })?;

    if ignore_no_log_file && error.code.as_deref() == Some(sockets::NO_LOG_FILE) {
        info!("The {} has no log file configured, ignoring", agent);
        return Ok(());
    }

    Err(PassengerError::Agent {
        agent: agent.to_string(),
        status: response.status,
        message: error.message.unwrap_or_else(|| response.body_text()),
    })
}
