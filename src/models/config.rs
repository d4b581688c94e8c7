//! Configuration model.
//!
//! Options are read from a TOML file and then overridden by environment
//! variables named `ASSET_ASSISTANT_<OPTION>`:
//! - `ASSET_ASSISTANT_PROCESS`, `_MOVIES`, `_SHOWS`, `_COLLECTIONS`: directories
//! - `ASSET_ASSISTANT_FAILED`, `_BACKUP`: output directories
//! - `ASSET_ASSISTANT_ENABLE_BACKUP`: move placed sources to backup instead of deleting
//! - `ASSET_ASSISTANT_SERVICE`: none, kodi, kometa, plex or other
//! - `ASSET_ASSISTANT_PLEX_SPECIALS`: true, false or unset
//! - `ASSET_ASSISTANT_DISCORD_WEBHOOK`, `_DISCORD_ENABLED`: notifications
//! - `ASSET_ASSISTANT_DEBUG`: debug logging

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const ENV_PREFIX: &str = "ASSET_ASSISTANT_";

/// Naming convention of the media service consuming the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    None,
    Kodi,
    Kometa,
    Plex,
    #[serde(alias = "other")]
    Generic,
}

impl Service {
    /// Whether any service convention is configured.
    pub fn is_configured(self) -> bool {
        self != Service::None
    }

    /// Whether collection artwork is supported by this convention.
    pub fn supports_collections(self) -> bool {
        matches!(self, Service::Kometa | Service::Kodi)
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Service::None => write!(f, "unspecified service"),
            Service::Kodi => write!(f, "Kodi"),
            Service::Kometa => write!(f, "Kometa"),
            Service::Plex => write!(f, "Plex"),
            Service::Generic => write!(f, "Other"),
        }
    }
}

impl FromStr for Service {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Service::None),
            "kodi" => Ok(Service::Kodi),
            "kometa" => Ok(Service::Kometa),
            "plex" => Ok(Service::Plex),
            "other" | "generic" => Ok(Service::Generic),
            other => Err(crate::Error::InvalidConfig(format!(
                "unknown service '{}', expected none, kodi, kometa, plex or other",
                other
            ))),
        }
    }
}

/// Application configuration, fully resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Staging directory.
    pub process: PathBuf,
    /// Movie library root.
    pub movies: PathBuf,
    /// Show library root.
    pub shows: PathBuf,
    /// Collection library root.
    pub collections: PathBuf,
    /// Failed directory.
    pub failed: PathBuf,
    /// Backup directory.
    pub backup: PathBuf,
    /// Move placed sources to backup instead of deleting them.
    pub enable_backup: bool,
    /// Target service convention.
    pub service: Service,
    /// Plex specials policy: `Specials` folder (true) or `Season 00` (false).
    pub plex_specials: Option<bool>,
    /// Discord webhook URL.
    pub discord_webhook: Option<String>,
    /// Whether Discord notifications are sent.
    pub discord_enabled: bool,
    /// Debug logging.
    pub debug: bool,
    /// Directory holding `assistant.log` and its rotations.
    pub log_dir: PathBuf,
}

/// Configuration as written in the file; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub process: Option<PathBuf>,
    pub movies: Option<PathBuf>,
    pub shows: Option<PathBuf>,
    pub collections: Option<PathBuf>,
    pub failed: Option<PathBuf>,
    pub backup: Option<PathBuf>,
    pub enable_backup: Option<bool>,
    pub service: Option<Service>,
    pub plex_specials: Option<bool>,
    pub discord_webhook: Option<String>,
    pub discord_enabled: Option<bool>,
    pub debug: Option<bool>,
}

impl RawConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Apply overrides from an environment lookup.
    ///
    /// The lookup receives the option name without prefix (e.g. `PROCESS`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        if let Some(p) = path("PROCESS") {
            self.process = Some(p);
        }
        if let Some(p) = path("MOVIES") {
            self.movies = Some(p);
        }
        if let Some(p) = path("SHOWS") {
            self.shows = Some(p);
        }
        if let Some(p) = path("COLLECTIONS") {
            self.collections = Some(p);
        }
        if let Some(p) = path("FAILED") {
            self.failed = Some(p);
        }
        if let Some(p) = path("BACKUP") {
            self.backup = Some(p);
        }
        if let Some(v) = lookup("ENABLE_BACKUP") {
            self.enable_backup = Some(parse_bool("enable_backup", &v)?);
        }
        if let Some(v) = lookup("SERVICE") {
            self.service = Some(v.parse()?);
        }
        if let Some(v) = lookup("PLEX_SPECIALS") {
            self.plex_specials = parse_tristate("plex_specials", &v)?;
        }
        if let Some(v) = lookup("DISCORD_WEBHOOK") {
            self.discord_webhook = Some(v);
        }
        if let Some(v) = lookup("DISCORD_ENABLED") {
            self.discord_enabled = Some(parse_bool("discord_enabled", &v)?);
        }
        if let Some(v) = lookup("DEBUG") {
            self.debug = Some(parse_bool("debug", &v)?);
        }

        Ok(())
    }

    /// Resolve into a complete configuration.
    ///
    /// `base_dir` supplies defaults for the failed, backup and log directories.
    pub fn resolve(self, base_dir: &Path) -> Result<Config> {
        let discord_webhook = self
            .discord_webhook
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());

        Ok(Config {
            process: self.process.ok_or(crate::Error::MissingOption("process"))?,
            movies: self.movies.ok_or(crate::Error::MissingOption("movies"))?,
            shows: self.shows.ok_or(crate::Error::MissingOption("shows"))?,
            collections: self
                .collections
                .ok_or(crate::Error::MissingOption("collections"))?,
            failed: self.failed.unwrap_or_else(|| base_dir.join("failed")),
            backup: self.backup.unwrap_or_else(|| base_dir.join("backup")),
            enable_backup: self.enable_backup.unwrap_or(false),
            service: self.service.unwrap_or_default(),
            plex_specials: self.plex_specials,
            // A webhook on its own enables notifications unless explicitly disabled.
            discord_enabled: self
                .discord_enabled
                .unwrap_or(discord_webhook.is_some()),
            discord_webhook,
            debug: self.debug.unwrap_or(false),
            log_dir: base_dir.join("logs"),
        })
    }
}

impl Config {
    /// Whether a Discord notification should be sent at the end of a run.
    pub fn discord_active(&self) -> bool {
        self.discord_enabled && self.discord_webhook.is_some()
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(crate::Error::InvalidConfig(format!(
            "'{}' expects a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_tristate(key: &str, value: &str) -> Result<Option<bool>> {
    match value.trim().to_lowercase().as_str() {
        "" | "unset" | "none" | "null" => Ok(None),
        other => parse_bool(key, other).map(Some),
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("asset_assistant")
}

/// Default configuration file location.
pub fn default_config_file() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Load configuration from file and environment.
///
/// An explicitly given file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let (config_path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_file(), false),
    };

    let mut raw = if config_path.exists() {
        tracing::debug!("Loading config from {}", config_path.display());
        let content = std::fs::read_to_string(&config_path)?;
        RawConfig::from_toml_str(&content)?
    } else if required {
        return Err(crate::Error::ConfigNotFound(config_path.display().to_string()));
    } else {
        tracing::debug!("No config file at {}, using environment only", config_path.display());
        RawConfig::default()
    };

    raw.apply_env(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())?;

    let base_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(dirs_config_path);
    raw.resolve(&base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_from_str() {
        assert_eq!("Plex".parse::<Service>().unwrap(), Service::Plex);
        assert_eq!("other".parse::<Service>().unwrap(), Service::Generic);
        assert_eq!("".parse::<Service>().unwrap(), Service::None);
        assert!("jellyfin".parse::<Service>().is_err());
    }

    #[test]
    fn test_service_capabilities() {
        assert!(Service::Kometa.supports_collections());
        assert!(Service::Kodi.supports_collections());
        assert!(!Service::Plex.supports_collections());
        assert!(!Service::None.is_configured());
    }

    #[test]
    fn test_parse_tristate() {
        assert_eq!(parse_tristate("x", "").unwrap(), None);
        assert_eq!(parse_tristate("x", "True").unwrap(), Some(true));
        assert_eq!(parse_tristate("x", "no").unwrap(), Some(false));
        assert!(parse_tristate("x", "maybe").is_err());
    }
}
