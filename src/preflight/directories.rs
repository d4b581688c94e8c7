//! Directory preflight checks.

use super::CheckResult;
use crate::models::config::Config;
use crate::Result;
use std::path::{Component, Path, PathBuf};

/// Check that a configured directory exists.
pub fn check_directory(name: &str, path: &Path) -> CheckResult {
    if !path.exists() {
        CheckResult::fail(
            name,
            &format!("{} does not exist", path.display()),
            "Create the directory or fix the path in your config",
        )
    } else if !path.is_dir() {
        CheckResult::fail(
            name,
            &format!("{} is not a directory", path.display()),
            "Point the option at a directory",
        )
    } else {
        CheckResult::ok(name, &path.display().to_string())
    }
}

/// Check that staging and the three libraries are four distinct paths.
pub fn check_distinct(config: &Config) -> CheckResult {
    match validate_distinct_paths(config) {
        Ok(()) => CheckResult::ok("Distinct paths", "process, movies, shows and collections differ"),
        Err(e) => CheckResult::fail(
            "Distinct paths",
            &e.to_string(),
            "process, movies, shows and collections must all be different directories",
        ),
    }
}

/// Check that the failed directory is not the staging directory.
pub fn check_failed_dir(config: &Config) -> CheckResult {
    if same_path(&config.failed, &config.process) {
        CheckResult::fail(
            "Failed directory",
            &format!("{} is the process directory", config.failed.display()),
            "Set 'failed' to a directory outside the process directory",
        )
    } else {
        CheckResult::ok("Failed directory", &config.failed.display().to_string())
    }
}

/// Fail with [`crate::Error::DuplicatePaths`] if any two of process, movies,
/// shows and collections refer to the same directory.
pub fn validate_distinct_paths(config: &Config) -> Result<()> {
    let paths: [(&'static str, &Path); 4] = [
        ("process", &config.process),
        ("movies", &config.movies),
        ("shows", &config.shows),
        ("collections", &config.collections),
    ];

    for (i, (first, a)) in paths.iter().enumerate() {
        for (second, b) in paths.iter().skip(i + 1) {
            if same_path(a, b) {
                return Err(crate::Error::DuplicatePaths {
                    first: *first,
                    second: *second,
                    path: a.display().to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Equal after lexical normalisation, or after canonicalisation when both exist.
fn same_path(a: &Path, b: &Path) -> bool {
    if normalize(a) == normalize(b) {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Drop `.` components and resolve `..` without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
