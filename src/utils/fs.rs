//! File system utilities.
//!
//! Every operation maps `std::io::Error` into distinct signals: not found,
//! permission denied, or a generic I/O error.

use crate::Result;
use std::io::ErrorKind;
use std::path::Path;

/// Map an I/O error on `path` to a crate error.
pub fn classify_io(err: std::io::Error, path: &Path) -> crate::Error {
    match err.kind() {
        ErrorKind::NotFound => crate::Error::PathNotFound(path.display().to_string()),
        ErrorKind::PermissionDenied => crate::Error::PermissionDenied(path.display().to_string()),
        _ => crate::Error::Io(err),
    }
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| classify_io(e, path))
}

/// Copy a file, overwriting the destination.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to).map_err(|e| classify_io(e, from))?;
    Ok(())
}

/// Rename a file within the same file system.
pub fn rename_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| classify_io(e, from))
}

/// Move a file from one location to another.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    // Try rename first (fast, same filesystem)
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    copy_file(from, to)?;
    remove_file(from)
}

/// Delete a file.
pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| classify_io(e, path))
}

/// List the names in a directory, sorted.
pub fn list_dir(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| classify_io(e, path))? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check if a file is a video file based on extension.
pub fn is_video_file(path: &Path) -> bool {
    const VIDEO_EXTENSIONS: &[&str] = &[
        "mkv", "mp4", "avi", "mov", "wmv", "m4v", "ts", "m2ts", "flv", "webm", "mpg", "mpeg",
    ];

    get_extension(path)
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
