//! Asset Assistant CLI
//!
//! Sorts poster, background and title-card artwork from a staging directory
//! into movie, show and collection libraries.

use asset_assistant::cli::{args::Cli, commands::run};
use asset_assistant::models::config::load_config;
use asset_assistant::utils::logs;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    init_logging(cli.debug || config.debug, &config.log_dir);

    print_banner();
    run::run(&config).await?;

    Ok(())
}

/// Initialize the logging system.
///
/// Console output plus a plain-text `assistant.log` in `log_dir`.
fn init_logging(debug: bool, log_dir: &Path) {
    use std::sync::Mutex;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if debug {
        EnvFilter::new("asset_assistant=debug")
    } else {
        EnvFilter::new("asset_assistant=info")
    };

    let file_layer = match logs::rotate_logs(log_dir).and_then(|path| Ok(std::fs::File::create(path)?)) {
        Ok(file) => Some(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        Err(e) => {
            eprintln!("{} could not open log file: {}", "[WARN]".yellow(), e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(file_layer)
        .with(filter)
        .init();
}

/// Log name, version and platform.
fn print_banner() {
    println!(
        "{} {}",
        "Asset Assistant".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!();

    tracing::info!("Version: v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Platform: {} ({})", whoami::platform(), whoami::distro());
}
