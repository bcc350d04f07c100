use std::fmt;

use crate::config::defaults::{AGENT_EXE, PROGRAM_NAME};

/// Custom error type for passenger-config operations
#[derive(Debug)]
pub enum PassengerError {
    /// No running instance was found in any registry directory
    NoInstanceRunning(String),
    /// No running instance has the requested name
    InstanceNotFound(String),
    /// Several instances are running and none was chosen
    MultipleInstances(String),
    /// The admin API rejected our credentials (HTTP 401)
    Unauthorized,
    /// An agent returned a structured JSON error
    Agent {
        agent: String,
        status: u16,
        message: String,
    },
    /// Unexpected response or failed exchange with a control socket
    Transport {
        target: String,
        status: Option<u16>,
        body: String,
    },
    /// HTTP exchange over a control socket failed
    Http(reqwest::Error),
    /// Instance registry could not be read
    Registry(String),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for PassengerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerError::NoInstanceRunning(msg) => write!(f, "{}", msg),
            PassengerError::InstanceNotFound(name) => write!(
                f,
                "*** ERROR: there doesn't seem to be a {} instance running with the name '{}'.",
                PROGRAM_NAME, name
            ),
            PassengerError::MultipleInstances(msg) => write!(f, "{}", msg),
            PassengerError::Unauthorized => write!(
                f,
                "*** ERROR: You are not authorized to perform this administrative action on \
                 this {} instance. Please try again with 'sudo'.",
                PROGRAM_NAME
            ),
            PassengerError::Agent {
                agent,
                status,
                message,
            } => write!(
                f,
                "*** An error occured while communicating with the {} {} (code {}):\n{}",
                AGENT_EXE, agent, status, message
            ),
            PassengerError::Transport {
                target,
                status: Some(status),
                body,
            } => write!(
                f,
                "*** An error occured while communicating with the {} {} (code {}):\n{}",
                AGENT_EXE, target, status, body
            ),
            PassengerError::Transport {
                target,
                status: None,
                body,
            } => write!(
                f,
                "*** An error occured while communicating with the {} {}:\n{}",
                AGENT_EXE, target, body
            ),
            PassengerError::Http(e) => write!(f, "HTTP request failed: {}", error_chain(e)),
            PassengerError::Registry(msg) => write!(f, "Instance registry error: {}", msg),
            PassengerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for PassengerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PassengerError::Http(e) => Some(e),
            PassengerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PassengerError {
    fn from(err: reqwest::Error) -> Self {
        PassengerError::Http(err)
    }
}

impl From<std::io::Error> for PassengerError {
    fn from(err: std::io::Error) -> Self {
        PassengerError::Io(err)
    }
}

/// Result type alias for passenger-config operations
pub type Result<T> = std::result::Result<T, PassengerError>;

/// Render an error with its sources, e.g. "error sending request: No such file or directory"
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
