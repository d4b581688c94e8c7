//! Placement data model.

use crate::core::library::LibraryEntry;
use crate::models::asset::FailureReason;
use serde::Serialize;
use std::path::PathBuf;

/// Where and under which name a staged asset goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementDecision {
    /// Library root (movies, shows or collections).
    pub destination_root: PathBuf,
    /// Matched library folder.
    pub entry: LibraryEntry,
    /// Sub-folder inside the library folder, e.g. `Season 03`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,
    /// Final filename.
    pub filename: String,
    /// Create the sub-folder if it does not exist yet.
    pub create_subfolder: bool,
}

impl PlacementDecision {
    /// Folder the asset lands in.
    pub fn target_dir(&self) -> PathBuf {
        let folder = self.destination_root.join(&self.entry.name);
        match &self.subfolder {
            Some(sub) => folder.join(sub),
            None => folder,
        }
    }

    /// Full path of the placed asset.
    pub fn target_path(&self) -> PathBuf {
        self.target_dir().join(&self.filename)
    }

    /// Library-relative folder for display, e.g. `Show (2008)/Season 03`.
    pub fn display_folder(&self) -> String {
        match &self.subfolder {
            Some(sub) => format!("{}/{}", self.entry.name, sub),
            None => self.entry.name.clone(),
        }
    }
}

/// Result of planning one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Ready(PlacementDecision),
    Failed(FailureReason),
}
