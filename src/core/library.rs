//! Library listings.
//!
//! Each library root (movies, shows, collections) is listed once per run into
//! a [`LibraryListing`]. The matcher and classifier only ever read these frozen
//! listings, so results are deterministic for a given run.

use crate::core::normalizer;
use crate::models::config::Config;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region tags recognised in folder names.
pub const REGION_TAGS: &[&str] = &["US", "USA", "UK", "AU", "CA", "NZ", "IE"];

/// Uppercased region tag if `group` is one, e.g. `uk` gives `UK`.
pub fn region_tag(group: &str) -> Option<String> {
    let upper = group.trim().to_uppercase();
    REGION_TAGS.contains(&upper.as_str()).then_some(upper)
}

/// Split the first parenthesised region group off a title.
///
/// `The Office (UK)` gives `("The Office", Some("UK"))`; titles without a
/// region group come back unchanged.
pub fn split_region(title: &str) -> (String, Option<String>) {
    let Ok(re) = regex::Regex::new(r"\(([^()]*)\)") else {
        return (title.to_string(), None);
    };

    for caps in re.captures_iter(title) {
        let (Some(whole), Some(group)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(region) = region_tag(group.as_str()) {
            let rest = format!("{} {}", &title[..whole.start()], &title[whole.end()..]);
            let bare = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            return (bare, Some(region));
        }
    }

    (title.to_string(), None)
}

/// One folder in a library root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    /// Folder name exactly as on disk.
    pub name: String,
    /// Title part (text before the first parenthesised group).
    pub title: String,
    /// Year from a `(YYYY)` group.
    pub year: Option<u16>,
    /// Region tag from a group such as `(US)` or `(UK)`, uppercased.
    pub region: Option<String>,
}

impl LibraryEntry {
    /// Parse a folder name such as `The Office (US) (2005)`.
    pub fn parse(name: &str) -> Self {
        let title = name
            .split('(')
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(name.trim())
            .to_string();

        let mut year = None;
        let mut region = None;
        if let Ok(re) = regex::Regex::new(r"\(([^()]*)\)") {
            for caps in re.captures_iter(name) {
                let Some(group) = caps.get(1).map(|m| m.as_str().trim()) else {
                    continue;
                };
                if year.is_none() && group.len() == 4 && group.chars().all(|c| c.is_ascii_digit()) {
                    year = group.parse().ok();
                } else if region.is_none() {
                    region = region_tag(group);
                }
            }
        }

        Self {
            name: name.to_string(),
            title,
            year,
            region,
        }
    }

    /// Tagged as a US release, `(US)` or `(USA)`.
    pub fn is_us(&self) -> bool {
        matches!(self.region.as_deref(), Some("US") | Some("USA"))
    }

    /// Tagged with a non-US region.
    pub fn is_foreign(&self) -> bool {
        self.region.is_some() && !self.is_us()
    }

    /// Comparable form of the title.
    pub fn comparable_title(&self) -> String {
        normalizer::comparable(&self.title)
    }
}

/// Frozen listing of one library root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryListing {
    /// Root directory of the library.
    pub root: PathBuf,
    /// Folders in listing order.
    pub entries: Vec<LibraryEntry>,
}

impl LibraryListing {
    /// List the sub-directories of `root`, sorted by name.
    pub fn read(root: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(root).map_err(|e| crate::utils::fs::classify_io(e, root))? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();

        tracing::debug!("Listed {} folders in {}", names.len(), root.display());
        Ok(Self::from_names(root, names))
    }

    /// Build a listing from names, keeping their order.
    pub fn from_names<I, S>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            root: root.to_path_buf(),
            entries: names
                .into_iter()
                .map(|n| LibraryEntry::parse(n.as_ref()))
                .collect(),
        }
    }

    /// Find a folder by name (case-insensitive, punctuation tolerant).
    pub fn find_by_name(&self, name: &str) -> Option<&LibraryEntry> {
        let wanted = normalizer::comparable(name);
        self.entries
            .iter()
            .find(|e| normalizer::comparable(&e.name) == wanted)
    }

    /// Absolute path of an entry in this library.
    pub fn path_of(&self, entry: &LibraryEntry) -> PathBuf {
        self.root.join(&entry.name)
    }

    /// Number of folders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library has no folders.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Frozen listings of all three libraries for one run.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    pub movies: LibraryListing,
    pub shows: LibraryListing,
    pub collections: LibraryListing,
}

impl LibrarySnapshot {
    /// Capture the three libraries named in the configuration.
    pub fn capture(config: &Config) -> Result<Self> {
        let snapshot = Self {
            movies: LibraryListing::read(&config.movies)?,
            shows: LibraryListing::read(&config.shows)?,
            collections: LibraryListing::read(&config.collections)?,
        };

        tracing::info!(
            "Library snapshot: {} movies, {} shows, {} collections",
            snapshot.movies.len(),
            snapshot.shows.len(),
            snapshot.collections.len()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_year() {
        let entry = LibraryEntry::parse("Breaking Bad (2008)");
        assert_eq!(entry.title, "Breaking Bad");
        assert_eq!(entry.year, Some(2008));
        assert_eq!(entry.region, None);
    }

    #[test]
    fn test_parse_region_and_year() {
        let entry = LibraryEntry::parse("The Office (US) (2005)");
        assert_eq!(entry.title, "The Office");
        assert_eq!(entry.year, Some(2005));
        assert_eq!(entry.region.as_deref(), Some("US"));
        assert!(entry.is_us());
        assert!(!entry.is_foreign());

        let entry = LibraryEntry::parse("The Office (uk)");
        assert_eq!(entry.region.as_deref(), Some("UK"));
        assert!(entry.is_foreign());
    }

    #[test]
    fn test_split_region() {
        assert_eq!(
            split_region("The Office (UK)"),
            ("The Office".to_string(), Some("UK".to_string()))
        );
        assert_eq!(
            split_region("The Office (us) (2005)"),
            ("The Office (2005)".to_string(), Some("US".to_string()))
        );
        assert_eq!(split_region("Alien (1979)"), ("Alien (1979)".to_string(), None));
        assert_eq!(split_region("Fargo"), ("Fargo".to_string(), None));
    }

    #[test]
    fn test_parse_plain_name() {
        let entry = LibraryEntry::parse("Marvel Collection");
        assert_eq!(entry.title, "Marvel Collection");
        assert_eq!(entry.year, None);
    }

    #[test]
    fn test_find_by_name() {
        let listing = LibraryListing::from_names(
            Path::new("/shows"),
            ["Breaking Bad (2008)", "Better Call Saul (2015)"],
        );
        assert!(listing.find_by_name("breaking bad (2008)").is_some());
        assert!(listing.find_by_name("Breaking Bad (2009)").is_none());
        assert_eq!(
            listing.path_of(&listing.entries[1]),
            PathBuf::from("/shows/Better Call Saul (2015)")
        );
    }
}
