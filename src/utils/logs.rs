//! Log file rotation.

use crate::utils::fs;
use crate::Result;
use std::path::{Path, PathBuf};

/// Name of the current log file.
pub const LOG_FILE: &str = "assistant.log";

/// Rotated generations kept next to the current log.
pub const LOG_GENERATIONS: usize = 3;

/// Shift `assistant.log` to `.1`, `.1` to `.2` and so on, dropping the oldest.
/// Returns the path of the fresh log file.
pub fn rotate_logs(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let generation = |n: usize| dir.join(format!("{}.{}", LOG_FILE, n));

    let oldest = generation(LOG_GENERATIONS);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..LOG_GENERATIONS).rev() {
        let from = generation(n);
        if from.exists() {
            fs::rename_file(&from, &generation(n + 1))?;
        }
    }

    let current = dir.join(LOG_FILE);
    if current.exists() {
        fs::rename_file(&current, &generation(1))?;
    }
    Ok(current)
}
