//! Asset-related data models.

use crate::core::library::split_region;
use crate::core::normalizer;
use crate::models::config::Service;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which filename pattern an asset matched, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePattern {
    /// `... Season <N> ...`
    SeasonFolder,
    /// `... Specials ...`
    Specials,
    /// `... S<NN>E<MM> ...`
    Episode,
    /// Anything else: collection, movie or show artwork.
    Plain,
}

/// A staged image, parsed from its filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    /// Raw filename as found in staging.
    pub filename: String,
    /// Extension without the dot, case preserved.
    pub extension: String,
    /// Parsed title (case preserved).
    pub title: String,
    /// Parsed year from a `(YYYY)` group.
    pub year: Option<u16>,
    /// Region tag from a group such as `(UK)`. It also stays in `title`,
    /// where the matcher reads it.
    pub region: Option<String>,
    /// Season number from `Season <N>` or the `S<NN>` half of an episode token.
    pub season: Option<u32>,
    /// Episode number from an `E<MM>` token.
    pub episode: Option<u32>,
    /// Whether the filename carries the "Specials" marker.
    pub is_specials: bool,
    /// Pattern that won under the fixed precedence.
    pub pattern: NamePattern,
}

impl AssetFile {
    /// Parse an asset from its filename.
    ///
    /// Precedence: season folder > specials > episode > plain.
    pub fn parse(filename: &str) -> Self {
        let (stem, extension) = normalizer::split_extension(filename);
        let season_folder = normalizer::extract_season(stem);
        let is_specials = normalizer::is_specials(stem);
        let episode = normalizer::extract_episode(stem);

        let pattern = if season_folder.is_some() {
            NamePattern::SeasonFolder
        } else if is_specials {
            NamePattern::Specials
        } else if episode.is_some() {
            NamePattern::Episode
        } else {
            NamePattern::Plain
        };

        let (mut title, year) = normalizer::extract_title_year(stem);
        if year.is_none() && pattern != NamePattern::Plain {
            title = normalizer::title_before_marker(stem);
        }

        let region = split_region(&title).1;

        let (season, episode) = match pattern {
            NamePattern::SeasonFolder => (season_folder, None),
            NamePattern::Specials => (None, None),
            NamePattern::Episode => (episode.map(|(s, _)| s), episode.map(|(_, e)| e)),
            NamePattern::Plain => (None, None),
        };

        Self {
            filename: filename.to_string(),
            extension: extension.unwrap_or_default().to_string(),
            title,
            year,
            region,
            season,
            episode,
            is_specials,
            pattern,
        }
    }

    /// Extension with a leading dot, or empty when the file has none.
    pub fn dotted_extension(&self) -> String {
        if self.extension.is_empty() {
            String::new()
        } else {
            format!(".{}", self.extension)
        }
    }

    /// Stem of the filename (no extension).
    pub fn stem(&self) -> &str {
        normalizer::split_extension(&self.filename).0
    }
}

/// Asset category, decided once per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Movie,
    Show,
    Season,
    Episode,
    Collection,
    Skip,
    NotSupported,
    Unmatched,
}

impl Category {
    /// Whether files of this category can be placed into a library.
    pub fn is_placeable(self) -> bool {
        matches!(
            self,
            Category::Movie
                | Category::Show
                | Category::Season
                | Category::Episode
                | Category::Collection
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Movie => write!(f, "Movie"),
            Category::Show => write!(f, "Show"),
            Category::Season => write!(f, "Season"),
            Category::Episode => write!(f, "Episode"),
            Category::Collection => write!(f, "Collection"),
            Category::Skip => write!(f, "Skip"),
            Category::NotSupported => write!(f, "Not supported"),
            Category::Unmatched => write!(f, "Unmatched"),
        }
    }
}

/// Why a file was routed to the failed directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("Asset skipped due to 'service' not being specified")]
    NoConvention,

    #[error("Asset skipped due to {service} not supporting {category} assets")]
    ConventionUnsupported { service: Service, category: Category },

    #[error("Match not found, please double check file/directory naming")]
    NoLibraryMatch,

    #[error("{folder} does not exist in {show}")]
    MissingSeasonFolder { folder: String, show: String },

    #[error("Corresponding video file not found in {show}/{folder}")]
    MissingCompanionVideo { folder: String, show: String },

    #[error("'{0}' is not a supported image file")]
    NotAnImage(String),

    #[error("'{0}' is not a valid zip file")]
    CorruptArchive(String),

    #[error("Unable to read image dimensions: {0}")]
    UnreadableImage(String),

    #[error("{0}")]
    Io(String),
}

impl FailureReason {
    /// Failure reason for a category that never reached the planner.
    pub fn for_category(category: Category, service: Service) -> Self {
        match category {
            Category::Skip => FailureReason::NoConvention,
            Category::NotSupported => FailureReason::ConventionUnsupported {
                service,
                category: Category::Collection,
            },
            _ => FailureReason::NoLibraryMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_season_poster() {
        let asset = AssetFile::parse("Breaking Bad (2008) - Season 3.jpg");
        assert_eq!(asset.pattern, NamePattern::SeasonFolder);
        assert_eq!(asset.title, "Breaking Bad");
        assert_eq!(asset.year, Some(2008));
        assert_eq!(asset.season, Some(3));
        assert_eq!(asset.extension, "jpg");
    }

    #[test]
    fn test_parse_episode_without_year() {
        let asset = AssetFile::parse("The Office S02E05.png");
        assert_eq!(asset.pattern, NamePattern::Episode);
        assert_eq!(asset.title, "The Office");
        assert_eq!(asset.year, None);
        assert_eq!(asset.season, Some(2));
        assert_eq!(asset.episode, Some(5));
    }

    #[test]
    fn test_parse_region_tag() {
        let asset = AssetFile::parse("The Office (UK) - S01E01.jpg");
        assert_eq!(asset.title, "The Office (UK)");
        assert_eq!(asset.region.as_deref(), Some("UK"));
        assert_eq!(asset.pattern, NamePattern::Episode);

        assert_eq!(AssetFile::parse("Alien (1979).png").region, None);
    }

    #[test]
    fn test_season_beats_specials_and_episode() {
        let asset = AssetFile::parse("Show (2019) - Season 1 Specials S01E01.jpg");
        assert_eq!(asset.pattern, NamePattern::SeasonFolder);
        assert!(asset.is_specials);
        assert_eq!(asset.episode, None);
    }

    #[test]
    fn test_specials_beats_episode() {
        let asset = AssetFile::parse("Show (2019) - Specials S00E01.jpg");
        assert_eq!(asset.pattern, NamePattern::Specials);
        assert_eq!(asset.season, None);
    }

    #[test]
    fn test_plain_asset() {
        let asset = AssetFile::parse("Marvel Collection.jpg");
        assert_eq!(asset.pattern, NamePattern::Plain);
        assert_eq!(asset.title, "Marvel Collection");
        assert_eq!(asset.dotted_extension(), ".jpg");
        assert_eq!(asset.stem(), "Marvel Collection");
    }

    #[test]
    fn test_failure_reason_messages() {
        assert_eq!(
            FailureReason::for_category(Category::Skip, Service::None).to_string(),
            "Asset skipped due to 'service' not being specified"
        );
        assert_eq!(
            FailureReason::for_category(Category::NotSupported, Service::Plex).to_string(),
            "Asset skipped due to Plex not supporting Collection assets"
        );
    }
}
