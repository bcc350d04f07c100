//! Reopen-logs command arguments

use clap::Parser;

/// Arguments for 'reopen-logs' command
#[derive(Parser, Debug, Clone, Default)]
#[command(after_help = "EXAMPLES:\n  \
        passenger-config reopen-logs\n  \
        passenger-config reopen-logs --instance 2a6b3f0c\n  \
        passenger-config reopen-logs --ignore-logs-not-available   # from a logrotate postrotate hook")]
pub struct ReopenLogsArgs {
    /// Exit successfully if Passenger was not configured with a log file
    #[arg(long, default_value_t = false)]
    pub ignore_logs_not_available: bool,

    /// The Passenger instance to select
    #[arg(long, value_name = "NAME")]
    pub instance: Option<String>,
}
