//! CLI argument parsing

mod reopen_logs;

use clap::{Parser, Subcommand};

use crate::config::defaults;

pub use reopen_logs::ReopenLogsArgs;

/// Passenger administration CLI
#[derive(Parser, Debug)]
#[command(name = "passenger-config")]
#[command(version)]
#[command(about = "Administer running Phusion Passenger instances", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: never prompt, fail when the instance to use is ambiguous
    #[arg(short, long, global = true, default_value_t = false)]
    pub batch: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Instruct Passenger agent processes to reopen their log files
    ///
    /// Run this after rotating log files. The command returns once the
    /// log files have been reopened.
    #[command(name = "reopen-logs")]
    ReopenLogs(ReopenLogsArgs),
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::ReopenLogs(_) => "reopen-logs",
        }
    }
}
