//! Per-file pipeline.
//!
//! Each staged file goes through classify, plan and execute before the next
//! one is touched. Per-file problems end in the failed directory; only fatal
//! errors stop the run.

use crate::core::classifier::{self, Classification};
use crate::core::executor::{Executor, ExecutorConfig};
use crate::core::library::LibrarySnapshot;
use crate::core::planner::{Planner, PlannerConfig};
use crate::core::scanner;
use crate::models::asset::{AssetFile, Category, FailureReason};
use crate::models::config::{Config, Service};
use crate::models::plan::PlanOutcome;
use crate::models::tally::RunTally;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What happened to one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Copied and renamed into a library folder.
    Placed {
        category: Category,
        /// Library-relative folder, e.g. `Show (2008)/Season 03`.
        folder: String,
        path: PathBuf,
    },
    /// Routed to the failed directory.
    Failed { reason: FailureReason },
    /// Disappeared from staging before it was processed.
    Vanished,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub tally: RunTally,
    /// Files that disappeared mid-run; not counted as failures.
    pub vanished: usize,
    pub elapsed: Duration,
}

/// Processes staged files one at a time.
pub struct Processor<'a> {
    service: Service,
    libraries: &'a LibrarySnapshot,
    planner: Planner<'a>,
    executor: &'a Executor,
}

impl<'a> Processor<'a> {
    /// Create a processor over a frozen library snapshot.
    pub fn new(config: PlannerConfig, libraries: &'a LibrarySnapshot, executor: &'a Executor) -> Self {
        Self {
            service: config.service,
            libraries,
            planner: Planner::new(config, libraries),
            executor,
        }
    }

    /// Process one staged file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if !path.exists() {
            tracing::warn!("{} disappeared from staging, skipping", filename);
            return Ok(FileOutcome::Vanished);
        }

        let asset = AssetFile::parse(&filename);
        let classification = classifier::classify(&asset, self.libraries, self.service);

        let outcome = match self.place(&asset, path, &classification)? {
            Ok((folder, target)) => FileOutcome::Placed {
                category: classification.category,
                folder,
                path: target,
            },
            Err(reason) => self.settle_failure(path, reason),
        };

        log_outcome(&filename, &classification, &outcome);
        Ok(outcome)
    }

    /// Route a per-file failure to the failed directory. A source that is no
    /// longer in staging vanished mid-run and is not a failure.
    fn settle_failure(&self, path: &Path, reason: FailureReason) -> FileOutcome {
        if !path.exists() {
            tracing::warn!("{} disappeared from staging ({}), skipping", path.display(), reason);
            return FileOutcome::Vanished;
        }

        if let Err(e) = self.executor.move_to_failed(path) {
            tracing::error!(" - Could not move {} to failed directory: {}", path.display(), e);
        }
        FileOutcome::Failed { reason }
    }

    /// Plan and execute. The inner `Err` is a per-file failure; the outer one
    /// is fatal.
    fn place(
        &self,
        asset: &AssetFile,
        path: &Path,
        classification: &Classification,
    ) -> Result<std::result::Result<(String, PathBuf), FailureReason>> {
        let decision = match self.planner.plan(asset, path, classification) {
            Ok(PlanOutcome::Ready(decision)) => decision,
            Ok(PlanOutcome::Failed(reason)) => return Ok(Err(reason)),
            Err(e) => return non_fatal(e),
        };

        let target = match self.executor.place(path, &decision) {
            Ok(target) => target,
            Err(e) => return non_fatal(e),
        };

        if let Err(e) = self.executor.finish_source(path) {
            tracing::warn!(" - Placed, but could not clean up {}: {}", asset.filename, e);
        }

        Ok(Ok((decision.display_folder(), target)))
    }
}

/// Fatal errors propagate; anything else becomes a per-file I/O failure.
fn non_fatal<T>(e: crate::Error) -> Result<std::result::Result<T, FailureReason>> {
    if e.is_fatal() {
        Err(e)
    } else {
        Ok(Err(FailureReason::Io(e.to_string())))
    }
}

fn log_outcome(filename: &str, classification: &Classification, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Placed { category, folder, path } => {
            let new_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            tracing::info!(" {}:", filename);
            tracing::info!(" - Category: {}", category);
            tracing::info!(" - Copied to {}", folder);
            tracing::info!(" - Renamed to {}", new_name);
            tracing::info!("");
        }
        FileOutcome::Failed { reason } => {
            tracing::info!(" {}:", filename);
            tracing::info!(" - Category: {}", classification.category);
            tracing::error!(" - {}", reason);
            tracing::info!(" - Moved to failed directory");
            tracing::info!("");
        }
        FileOutcome::Vanished => {}
    }
}

/// Run the whole pipeline for a configuration.
pub fn run(config: &Config) -> Result<RunReport> {
    let started = Instant::now();
    let executor = Executor::new(ExecutorConfig::from_config(config));

    let staging = scanner::prepare_staging(&config.process, &executor)?;
    let libraries = LibrarySnapshot::capture(config)?;
    let processor = Processor::new(PlannerConfig::from(config), &libraries, &executor);

    let mut tally = RunTally::default();
    for _ in &staging.rejected {
        tally.record_failed();
    }

    let pb = ProgressBar::new(staging.files.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }

    let mut vanished = 0;
    for path in &staging.files {
        pb.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );

        let outcome = match processor.process_file(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };

        match outcome {
            FileOutcome::Placed { category, .. } => tally.record_placed(category),
            FileOutcome::Failed { .. } => tally.record_failed(),
            FileOutcome::Vanished => vanished += 1,
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(RunReport {
        tally,
        vanished,
        elapsed: started.elapsed(),
    })
}
