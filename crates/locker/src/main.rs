//! Locker CLI binary.
//!
//! This binary provides command-line access to a local media locker:
//! - Upload, list, rename and delete media
//! - Inspect and overwrite content hash tags
//! - Record interactions and check messaging eligibility
//! - Grade and hash passwords

use clap::Parser;
use locker::{Locker, ObservabilityConfig, init_observability};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, load_config, run, run_offline};

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    // Execute the requested command
    let Some(command) = run_offline(cli.command)? else {
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let locker = Locker::open(config).await?;
    let outcome = run(&locker, command).await;
    locker.shutdown().await?;
    outcome?;

    Ok(())
}
