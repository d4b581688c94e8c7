//! Staging scanner module.
//!
//! Prepares the staging directory before any asset is processed:
//! 1. `.zip` archives are unpacked, their images moved up, and the archive deleted
//! 2. sub-directories are flattened: images move up, anything else fails
//! 3. a sorted snapshot of the remaining files is taken; non-images fail
//!
//! Everything routed to the failed directory here is reported back as a
//! [`Rejected`] entry so it is counted like any other failure.

use crate::core::executor::Executor;
use crate::core::normalizer;
use crate::models::asset::FailureReason;
use crate::utils::fs;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A staged file that was routed to the failed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Filename as it was staged.
    pub name: String,
    /// Why it was rejected.
    pub reason: FailureReason,
}

/// Stable snapshot of the staging directory.
#[derive(Debug, Default)]
pub struct StagingSnapshot {
    /// Image files to process, sorted by name.
    pub files: Vec<PathBuf>,
    /// Files already routed to the failed directory.
    pub rejected: Vec<Rejected>,
    /// Archives extracted.
    pub archives_extracted: usize,
    /// Images moved up out of sub-directories and archives.
    pub flattened: usize,
}

/// Extract, flatten and snapshot the staging directory.
pub fn prepare_staging(process_dir: &Path, executor: &Executor) -> Result<StagingSnapshot> {
    fs::ensure_directory(process_dir)?;

    let mut snapshot = StagingSnapshot::default();
    extract_archives(process_dir, executor, &mut snapshot)?;
    flatten_directories(process_dir, executor, &mut snapshot)?;

    for path in top_level_files(process_dir)? {
        let name = file_name_of(&path);
        if normalizer::is_supported_image(&name) {
            snapshot.files.push(path);
        } else {
            reject(executor, &path, FailureReason::NotAnImage(name), &mut snapshot);
        }
    }

    tracing::info!(
        "Staging: {} images, {} archives extracted, {} images moved up, {} rejected",
        snapshot.files.len(),
        snapshot.archives_extracted,
        snapshot.flattened,
        snapshot.rejected.len()
    );

    Ok(snapshot)
}

/// Extract every top-level `.zip` and lift its contents into staging.
fn extract_archives(process_dir: &Path, executor: &Executor, snapshot: &mut StagingSnapshot) -> Result<()> {
    for path in top_level_files(process_dir)? {
        let name = file_name_of(&path);
        if !normalizer::is_archive(&name) {
            continue;
        }

        // Unpack beside the staged files, never over them.
        let unpack_dir = process_dir.join(format!(".{}.unpack", name));
        match extract_zip(&path, &unpack_dir) {
            Ok(()) => {
                snapshot.archives_extracted += 1;
                tracing::info!("Extracted archive: {}", name);
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!("Could not remove extracted archive {}: {}", name, e);
                }
                lift_files(&unpack_dir, process_dir, executor, snapshot);
            }
            Err(e) => {
                tracing::error!("Failed to extract {}: {}", name, e);
                if unpack_dir.exists() {
                    remove_tree(&unpack_dir);
                }
                reject(executor, &path, FailureReason::CorruptArchive(name), snapshot);
            }
        }
    }
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = std::fs::File::open(archive).map_err(|e| fs::classify_io(e, archive))?;
    let mut zip = zip::ZipArchive::new(file)?;
    fs::create_dir_all(dest)?;
    zip.extract(dest)?;
    Ok(())
}

/// Lift the contents of every sub-directory into staging.
fn flatten_directories(process_dir: &Path, executor: &Executor, snapshot: &mut StagingSnapshot) -> Result<()> {
    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(process_dir)
        .map_err(|e| fs::classify_io(e, process_dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    subdirs.sort();

    for dir in subdirs {
        lift_files(&dir, process_dir, executor, snapshot);
    }
    Ok(())
}

/// Move every image under `dir` up into staging and remove `dir` once it is
/// empty. Non-images, name collisions and failed moves go to the failed
/// directory; nothing here stops the run.
fn lift_files(dir: &Path, process_dir: &Path, executor: &Executor, snapshot: &mut StagingSnapshot) {
    let (nested, _) = walk_files(dir);

    for path in &nested {
        let path = path.as_path();
        let name = file_name_of(path);
        let dest = process_dir.join(&name);

        if !normalizer::is_supported_image(&name) {
            reject(executor, path, FailureReason::NotAnImage(name), snapshot);
        } else if dest.exists() {
            tracing::warn!("{} already exists in staging", name);
            reject(
                executor,
                path,
                FailureReason::Io(format!("'{}' already exists in the staging directory", name)),
                snapshot,
            );
        } else {
            match fs::move_file(path, &dest) {
                Ok(()) => {
                    snapshot.flattened += 1;
                    tracing::debug!("Moved up: {:?} -> {:?}", path, dest);
                }
                Err(e) => reject(executor, path, FailureReason::Io(e.to_string()), snapshot),
            }
        }
    }

    let (leftover, unreadable) = walk_files(dir);
    if !leftover.is_empty() || unreadable > 0 {
        tracing::warn!("Leaving {} in place, it still contains files", dir.display());
    } else {
        remove_tree(dir);
    }
}

/// Regular files under `dir` in walk order, plus the number of entries that
/// could not be read.
fn walk_files(dir: &Path) -> (Vec<PathBuf>, usize) {
    let mut files = Vec::new();
    let mut unreadable = 0;
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                unreadable += 1;
                tracing::warn!("Could not read inside {}: {}", dir.display(), e);
            }
        }
    }
    (files, unreadable)
}

fn remove_tree(dir: &Path) {
    match std::fs::remove_dir_all(dir) {
        Ok(()) => tracing::debug!("Removed directory: {:?}", dir),
        Err(e) => tracing::warn!("Could not remove {}: {}", dir.display(), e),
    }
}

/// Regular files directly inside `dir`, sorted.
fn top_level_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(fs::list_dir(dir)?
        .into_iter()
        .map(|name| dir.join(name))
        .filter(|p| p.is_file())
        .collect())
}

fn reject(executor: &Executor, path: &Path, reason: FailureReason, snapshot: &mut StagingSnapshot) {
    let name = file_name_of(path);
    match executor.move_to_failed(path) {
        Ok(_) => {
            tracing::info!(" {}:", name);
            tracing::error!(" - {}", reason);
            tracing::info!(" - Moved to failed directory");
            snapshot.rejected.push(Rejected { name, reason });
        }
        Err(e) => tracing::warn!("Could not move {} to the failed directory: {}", name, e),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
