//! passenger-config - Main entry point

use clap::Parser;
use log::{debug, info};

use passenger_config::{run_reopen_logs_command, Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting passenger-config v{}", env!("CARGO_PKG_VERSION"));
    debug!("CLI args: {:?}", cli);

    let result = match &cli.command {
        Command::ReopenLogs(args) => run_reopen_logs_command(&cli, args).await,
    };

    if let Err(e) = result {
        debug!("Command failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Completed successfully");
}
