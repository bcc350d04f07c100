//! Subcommand handlers

pub mod reopen_logs;

pub use reopen_logs::{perform_reopen_logs, run_reopen_logs_command};
