//! Placement executor.
//!
//! Carries out placement decisions against the file system:
//! - mkdir: create a plex season folder when the decision allows it
//! - copy: copy the staged file into the library folder under its original name
//! - rename: give the copy its final name
//! - finish: back up or delete the staged source
//!
//! A file is either fully copied and renamed or the library is left untouched.

use crate::models::config::Config;
use crate::models::plan::PlacementDecision;
use crate::utils::{fs, hash};
use crate::Result;
use std::path::{Path, PathBuf};

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Whether to verify checksums after copying files.
    pub verify_checksum: bool,
    /// Where unplaceable files go.
    pub failed_dir: PathBuf,
    /// Where placed sources go; `None` deletes them instead.
    pub backup_dir: Option<PathBuf>,
}

impl ExecutorConfig {
    /// Build from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            verify_checksum: true,
            failed_dir: config.failed.clone(),
            backup_dir: config.enable_backup.then(|| config.backup.clone()),
        }
    }
}

/// Placement executor.
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// Create a new executor.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Copy `source` into place and rename it. Returns the final path.
    pub fn place(&self, source: &Path, decision: &PlacementDecision) -> Result<PathBuf> {
        let target_dir = decision.target_dir();

        if !target_dir.is_dir() {
            if decision.create_subfolder {
                fs::create_dir_all(&target_dir)?;
                tracing::debug!("Created directory: {:?}", target_dir);
            } else {
                return Err(crate::Error::PathNotFound(target_dir.display().to_string()));
            }
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| crate::Error::other(format!("Not a file: {}", source.display())))?;
        let copied = target_dir.join(file_name);
        let target = decision.target_path();

        fs::copy_file(source, &copied)?;

        if self.config.verify_checksum {
            let expected = hash::file_sha256(source)?;
            if hash::file_sha256(&copied)? != expected {
                // Remove incomplete copy
                let _ = fs::remove_file(&copied);
                return Err(crate::Error::ChecksumMismatch(copied.display().to_string()));
            }
        }

        if copied != target {
            if let Err(e) = fs::rename_file(&copied, &target) {
                let _ = fs::remove_file(&copied);
                return Err(e);
            }
        }

        tracing::debug!("Placed: {:?} -> {:?}", source, target);
        Ok(target)
    }

    /// Back up or delete a source that has been placed.
    pub fn finish_source(&self, source: &Path) -> Result<()> {
        match &self.config.backup_dir {
            Some(backup_dir) => {
                let dest = Self::destination_in(backup_dir, source)?;
                fs::move_file(source, &dest)?;
                tracing::debug!("Backed up: {:?} -> {:?}", source, dest);
            }
            None => {
                fs::remove_file(source)?;
                tracing::debug!("Removed: {:?}", source);
            }
        }
        Ok(())
    }

    /// Move an unplaceable file into the failed directory, intact.
    pub fn move_to_failed(&self, source: &Path) -> Result<PathBuf> {
        let dest = Self::destination_in(&self.config.failed_dir, source)?;
        fs::move_file(source, &dest)?;
        tracing::debug!("Moved to failed: {:?} -> {:?}", source, dest);
        Ok(dest)
    }

    fn destination_in(dir: &Path, source: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let file_name = source
            .file_name()
            .ok_or_else(|| crate::Error::other(format!("Not a file: {}", source.display())))?;
        Ok(dir.join(file_name))
    }
}
