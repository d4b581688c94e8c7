//! Asset classifier.
//!
//! Decides the [`Category`] of a staged image from its parsed filename and
//! the frozen library listings. Rules are applied in a fixed order and the
//! first one that applies wins:
//!
//! 1. `Season <N>` poster
//! 2. `Specials` poster
//! 3. `S<NN>E<MM>` episode card
//! 4. collection, then movie, then show artwork
//! 5. unmatched

use crate::core::library::LibrarySnapshot;
use crate::core::matcher::{self, MatchMode};
use crate::models::asset::{AssetFile, Category, NamePattern};
use crate::models::config::Service;

/// Outcome of classifying one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Season number; `None` for the specials season.
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl Classification {
    fn of(category: Category) -> Self {
        Self {
            category,
            season: None,
            episode: None,
        }
    }
}

/// Classify an asset against the library snapshot.
pub fn classify(asset: &AssetFile, libraries: &LibrarySnapshot, service: Service) -> Classification {
    let classification = match asset.pattern {
        NamePattern::SeasonFolder | NamePattern::Specials => {
            let category = if !service.is_configured() {
                Category::Skip
            } else if show_folder_exists(asset, libraries) {
                Category::Season
            } else {
                Category::Unmatched
            };
            Classification {
                category,
                season: asset.season,
                episode: None,
            }
        }
        NamePattern::Episode => {
            // A bare `S01E02` has no title to check; the planner resolves it or fails it.
            let category = if !service.is_configured() {
                Category::Skip
            } else if asset.title.is_empty()
                || matcher::find_best_match(&asset.title, asset.year, &libraries.shows, MatchMode::Prefix)
                    .is_some()
            {
                Category::Episode
            } else {
                Category::Unmatched
            };
            Classification {
                category,
                season: asset.season,
                episode: asset.episode,
            }
        }
        NamePattern::Plain => Classification::of(classify_plain(asset, libraries, service)),
    };

    tracing::debug!(
        "Classified '{}' as {:?} (region {:?}, season {:?}, episode {:?})",
        asset.filename,
        classification.category,
        asset.region,
        classification.season,
        classification.episode
    );

    classification
}

/// With a year present, the show folder must exist under its exact name.
/// Without one, resolution is left to the matcher at placement time.
fn show_folder_exists(asset: &AssetFile, libraries: &LibrarySnapshot) -> bool {
    match asset.year {
        Some(year) => libraries
            .shows
            .find_by_name(&format!("{} ({})", asset.title, year))
            .is_some(),
        None => true,
    }
}

fn classify_plain(asset: &AssetFile, libraries: &LibrarySnapshot, service: Service) -> Category {
    if matcher::find_collection(asset.stem(), &libraries.collections).is_some() {
        return if service.supports_collections() {
            Category::Collection
        } else {
            Category::NotSupported
        };
    }

    let movie = matcher::find_best_match(&asset.title, asset.year, &libraries.movies, MatchMode::Contains);
    let show = matcher::find_best_match(&asset.title, asset.year, &libraries.shows, MatchMode::Contains);

    // Strong evidence in either library beats a partial hit in the other.
    match (movie, show) {
        (Some(m), Some(s)) if m.is_confident() && s.is_confident() && s.tier < m.tier => Category::Show,
        (Some(m), _) if m.is_confident() => Category::Movie,
        (_, Some(s)) if s.is_confident() => Category::Show,
        (Some(_), _) => Category::Movie,
        (None, Some(_)) => Category::Show,
        (None, None) => Category::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::library::LibraryListing;
    use std::path::Path;

    fn snapshot(movies: &[&str], shows: &[&str], collections: &[&str]) -> LibrarySnapshot {
        LibrarySnapshot {
            movies: LibraryListing::from_names(Path::new("/movies"), movies.iter().copied()),
            shows: LibraryListing::from_names(Path::new("/shows"), shows.iter().copied()),
            collections: LibraryListing::from_names(Path::new("/collections"), collections.iter().copied()),
        }
    }

    #[test]
    fn test_strong_show_beats_partial_movie() {
        let libs = snapshot(&["Lost in Translation (2003)"], &["Lost (2004)"], &[]);
        let asset = AssetFile::parse("Lost (2004).jpg");
        assert_eq!(classify(&asset, &libs, Service::Plex).category, Category::Show);
    }

    #[test]
    fn test_specials_without_service_is_skip() {
        let libs = snapshot(&[], &["Doctor Who (2005)"], &[]);
        let asset = AssetFile::parse("Doctor Who (2005) - Specials.jpg");
        let result = classify(&asset, &libs, Service::None);
        assert_eq!(result.category, Category::Skip);
        assert_eq!(result.season, None);
    }

    #[test]
    fn test_specials_with_service() {
        let libs = snapshot(&[], &["Doctor Who (2005)"], &[]);
        let asset = AssetFile::parse("Doctor Who (2005) - Specials.jpg");
        assert_eq!(classify(&asset, &libs, Service::Kometa).category, Category::Season);
    }
}
