//! Error types for the asset assistant.
//!
//! Fatal conditions and the I/O errors behind them live here. Per-file problems
//! are recorded as [`crate::models::asset::FailureReason`] and never abort a run.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the asset assistant.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing required configuration option '{0}'")]
    MissingOption(&'static str),

    #[error("Directories '{first}' and '{second}' resolve to the same path: {path}")]
    DuplicatePaths {
        first: &'static str,
        second: &'static str,
        path: String,
    },

    #[error("'plex_specials' is not set in the config, please set it to true or false and try again")]
    PlexSpecialsUnset,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Checksum mismatch after copy: {0}")]
    ChecksumMismatch(String),

    // Preflight
    #[error("Preflight checks failed")]
    PreflightFailed,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // TOML errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Archive errors
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // Image errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error should halt the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound(_)
                | Error::InvalidConfig(_)
                | Error::MissingOption(_)
                | Error::DuplicatePaths { .. }
                | Error::PlexSpecialsUnset
                | Error::PreflightFailed
        )
    }
}
