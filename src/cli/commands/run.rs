//! Run command implementation.
//!
//! Validates the configuration, sorts the staging directory into the
//! libraries, prints a summary and sends the optional Discord notification.

use crate::core::processor::{self, RunReport};
use crate::models::config::Config;
use crate::preflight;
use crate::services::discord::{DiscordConfig, DiscordNotifier, RunSummary};
use crate::utils::fs;
use crate::Result;
use colored::Colorize;

/// Sort the staging directory described by `config`.
pub async fn run(config: &Config) -> Result<RunReport> {
    run_preflight_checks(config)?;

    fs::create_dir_all(&config.failed)?;
    if config.enable_backup {
        fs::create_dir_all(&config.backup)?;
    }

    tracing::info!("Service: {}", config.service);
    tracing::info!("Backup enabled: {}", config.enable_backup);
    println!("{}", "[RUN] Processing staged assets...".bold().cyan());
    println!();

    let report = processor::run(config)?;
    print_summary(config, &report);

    if config.discord_active() {
        notify(config, &report).await;
    }

    Ok(report)
}

/// Run preflight checks and stop if any fail.
fn run_preflight_checks(config: &Config) -> Result<()> {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config);
    preflight::print_results(&results);
    println!();

    // Surface the precise path error rather than a generic failure.
    preflight::validate_distinct_paths(config)?;
    if !preflight::all_passed(&results) {
        return Err(crate::Error::PreflightFailed);
    }
    Ok(())
}

fn print_summary(config: &Config, report: &RunReport) {
    let tally = &report.tally;

    println!("{}", "[Summary]".bold().green());
    println!("  {} {}", "Movie assets:".bold(), tally.movie);
    println!("  {} {}", "Show assets:".bold(), tally.show);
    println!("  {} {}", "Season posters:".bold(), tally.season);
    println!("  {} {}", "Episode cards:".bold(), tally.episode);
    println!("  {} {}", "Collection assets:".bold(), tally.collection);
    if tally.failed > 0 {
        println!("  {} {}", "Failures:".bold().red(), tally.failed);
    } else {
        println!("  {} {}", "Failures:".bold(), tally.failed);
    }
    if report.vanished > 0 {
        println!("  {} {}", "Vanished:".bold().yellow(), report.vanished);
    }
    println!(
        "  {} {}",
        "Backup enabled:".bold(),
        if config.enable_backup { "Yes" } else { "No" }
    );
    println!(
        "  {} {:.2} seconds",
        "Total run time:".bold(),
        report.elapsed.as_secs_f64()
    );
    println!();

    if tally.failed > 0 {
        println!(
            "  Check {} for files that need attention",
            config.failed.display().to_string().cyan()
        );
        println!();
    }

    tracing::info!(
        "Run complete: {} placed, {} failed in {:.2}s",
        tally.placed(),
        tally.failed,
        report.elapsed.as_secs_f64()
    );
}

/// Send the run summary to Discord. Failures only warn.
async fn notify(config: &Config, report: &RunReport) {
    let Some(webhook) = config.discord_webhook.as_deref() else {
        return;
    };

    let summary = RunSummary {
        tally: report.tally,
        backup_enabled: config.enable_backup,
        runtime_secs: report.elapsed.as_secs_f64(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let result = match DiscordNotifier::with_config(DiscordConfig::new(webhook)) {
        Ok(notifier) => notifier.send(&summary).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        tracing::warn!("Discord notification failed: {}", e);
    }
}
