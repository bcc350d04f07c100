//! passenger-config - administer running Phusion Passenger instances
//!
//! Talks to the watchdog and agent processes of a running instance through
//! the admin HTTP APIs they serve on local Unix sockets.
//!
//! # Features
//!
//! - Discover running instances from the instance registry
//! - Select an instance by name, automatically, or interactively
//! - Reopen log files after log rotation
//!
//! # Example
//!
//! ```bash
//! # Reopen logs of the only running instance
//! passenger-config reopen-logs
//!
//! # Target a specific instance, tolerate a missing log file
//! passenger-config reopen-logs --instance 2a6b3f0c --ignore-logs-not-available
//! ```

pub mod admin;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod instance;
pub mod output;

pub use admin::{AdminRequest, AdminResponse, AdminSocket};
pub use cli::{Cli, Command, ReopenLogsArgs};
pub use commands::{perform_reopen_logs, run_reopen_logs_command};
pub use error::{PassengerError, Result};
pub use instance::{select_instance, AdminCredentials, Instance, InstanceRegistry};
