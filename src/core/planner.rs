//! Placement planner.
//!
//! Turns a classified asset into a [`PlacementDecision`]: the library folder it
//! belongs to, an optional season sub-folder and the filename the target
//! service expects.
//!
//! | Category | Service | Sub-folder | Filename |
//! |---|---|---|---|
//! | movie, show, collection | any | none | `poster.<ext>` / `background.<ext>` |
//! | season | kometa | none | `Season<NN>.<ext>` |
//! | season | plex | `Season <NN>` or specials folder | `Season<NN>.<ext>` / `season-specials-poster.<ext>` |
//! | episode | kometa | none | `S<NN>E<NN>.<ext>` |
//! | episode | plex | existing season folder | companion video stem + `.<ext>` |

use crate::core::classifier::Classification;
use crate::core::library::{LibraryEntry, LibraryListing, LibrarySnapshot};
use crate::core::matcher::{self, MatchMode};
use crate::core::normalizer::{self, pad2};
use crate::models::asset::{AssetFile, Category, FailureReason};
use crate::models::config::{Config, Service};
use crate::models::plan::{PlacementDecision, PlanOutcome};
use crate::services::image;
use crate::utils::fs;
use crate::Result;
use std::path::Path;

/// Planner configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlannerConfig {
    /// Target service convention.
    pub service: Service,
    /// Plex specials policy; `None` is fatal once a specials asset needs it.
    pub plex_specials: Option<bool>,
}

impl From<&Config> for PlannerConfig {
    fn from(config: &Config) -> Self {
        Self {
            service: config.service,
            plex_specials: config.plex_specials,
        }
    }
}

/// Placement planner over a frozen library snapshot.
pub struct Planner<'a> {
    config: PlannerConfig,
    libraries: &'a LibrarySnapshot,
}

impl<'a> Planner<'a> {
    /// Create a planner.
    pub fn new(config: PlannerConfig, libraries: &'a LibrarySnapshot) -> Self {
        Self { config, libraries }
    }

    /// Plan the placement of `asset`, staged at `source`.
    ///
    /// Per-file problems come back as [`PlanOutcome::Failed`]. An unset plex
    /// specials policy is returned as an error since it halts the run.
    pub fn plan(
        &self,
        asset: &AssetFile,
        source: &Path,
        classification: &Classification,
    ) -> Result<PlanOutcome> {
        let category = classification.category;
        if !category.is_placeable() {
            return Ok(PlanOutcome::Failed(FailureReason::for_category(
                category,
                self.config.service,
            )));
        }

        let libraries = self.libraries;
        let (listing, entry) = match category {
            Category::Movie => (
                &libraries.movies,
                matcher::find_best_match(&asset.title, asset.year, &libraries.movies, MatchMode::Contains)
                    .map(|m| m.entry),
            ),
            Category::Show => (
                &libraries.shows,
                matcher::find_best_match(&asset.title, asset.year, &libraries.shows, MatchMode::Contains)
                    .map(|m| m.entry),
            ),
            Category::Collection => (
                &libraries.collections,
                matcher::find_collection(asset.stem(), &libraries.collections),
            ),
            Category::Season => (&libraries.shows, self.find_season_show(asset)),
            _ => (
                &libraries.shows,
                matcher::find_best_match(&asset.title, asset.year, &libraries.shows, MatchMode::Prefix)
                    .map(|m| m.entry),
            ),
        };

        let Some(entry) = entry else {
            return Ok(PlanOutcome::Failed(FailureReason::NoLibraryMatch));
        };

        match category {
            Category::Movie | Category::Show | Category::Collection => {
                Ok(self.plan_artwork(asset, source, listing, entry))
            }
            Category::Season => self.plan_season(asset, classification, listing, entry),
            _ => self.plan_episode(asset, classification, listing, entry),
        }
    }

    /// Show folder for a season poster: the exact `Title (Year)` folder when a
    /// year is given, otherwise the matcher's best prefix match.
    fn find_season_show(&self, asset: &AssetFile) -> Option<&'a LibraryEntry> {
        let shows = &self.libraries.shows;
        match asset.year {
            Some(year) => shows.find_by_name(&format!("{} ({})", asset.title, year)),
            None => matcher::find_best_match(&asset.title, None, shows, MatchMode::Prefix).map(|m| m.entry),
        }
    }

    fn plan_artwork(
        &self,
        asset: &AssetFile,
        source: &Path,
        listing: &LibraryListing,
        entry: &LibraryEntry,
    ) -> PlanOutcome {
        let orientation = match image::read_orientation(source) {
            Ok(orientation) => orientation,
            Err(e) => return PlanOutcome::Failed(FailureReason::UnreadableImage(e.to_string())),
        };

        PlanOutcome::Ready(PlacementDecision {
            destination_root: listing.root.clone(),
            entry: entry.clone(),
            subfolder: None,
            filename: format!("{}{}", orientation.artwork_name(), asset.dotted_extension()),
            create_subfolder: false,
        })
    }

    fn plan_season(
        &self,
        asset: &AssetFile,
        classification: &Classification,
        listing: &LibraryListing,
        entry: &LibraryEntry,
    ) -> Result<PlanOutcome> {
        let ext = asset.dotted_extension();
        let (subfolder, filename) = match self.config.service {
            Service::Kometa => {
                let number = classification.season.map(pad2).unwrap_or_else(|| "00".to_string());
                (None, format!("Season{}{}", number, ext))
            }
            Service::Plex => match classification.season {
                Some(season) => (
                    Some(format!("Season {}", pad2(season))),
                    format!("Season{}{}", pad2(season), ext),
                ),
                None => (
                    Some(self.plex_specials_folder()?.to_string()),
                    format!("season-specials-poster{}", ext),
                ),
            },
            service => {
                return Ok(PlanOutcome::Failed(FailureReason::ConventionUnsupported {
                    service,
                    category: Category::Season,
                }))
            }
        };

        Ok(PlanOutcome::Ready(PlacementDecision {
            destination_root: listing.root.clone(),
            entry: entry.clone(),
            create_subfolder: subfolder.is_some(),
            subfolder,
            filename,
        }))
    }

    fn plan_episode(
        &self,
        asset: &AssetFile,
        classification: &Classification,
        listing: &LibraryListing,
        entry: &LibraryEntry,
    ) -> Result<PlanOutcome> {
        let (Some(season), Some(episode)) = (classification.season, classification.episode) else {
            return Ok(PlanOutcome::Failed(FailureReason::NoLibraryMatch));
        };

        match self.config.service {
            Service::Kometa => Ok(PlanOutcome::Ready(PlacementDecision {
                destination_root: listing.root.clone(),
                entry: entry.clone(),
                subfolder: None,
                filename: format!("S{}E{}{}", pad2(season), pad2(episode), asset.dotted_extension()),
                create_subfolder: false,
            })),
            Service::Plex => {
                let folder = if season == 0 {
                    self.plex_specials_folder()?.to_string()
                } else {
                    format!("Season {}", pad2(season))
                };

                let season_dir = listing.path_of(entry).join(&folder);
                if !season_dir.is_dir() {
                    return Ok(PlanOutcome::Failed(FailureReason::MissingSeasonFolder {
                        folder,
                        show: entry.name.clone(),
                    }));
                }

                let Some(video_stem) = find_companion_video(&season_dir, season, episode)? else {
                    return Ok(PlanOutcome::Failed(FailureReason::MissingCompanionVideo {
                        folder,
                        show: entry.name.clone(),
                    }));
                };

                Ok(PlanOutcome::Ready(PlacementDecision {
                    destination_root: listing.root.clone(),
                    entry: entry.clone(),
                    subfolder: Some(folder),
                    filename: format!("{}{}", video_stem, asset.dotted_extension()),
                    create_subfolder: false,
                }))
            }
            service => Ok(PlanOutcome::Failed(FailureReason::ConventionUnsupported {
                service,
                category: Category::Episode,
            })),
        }
    }

    fn plex_specials_folder(&self) -> Result<&'static str> {
        match self.config.plex_specials {
            Some(true) => Ok("Specials"),
            Some(false) => Ok("Season 00"),
            None => Err(crate::Error::PlexSpecialsUnset),
        }
    }
}

/// Stem of the first video in `season_dir` carrying the same S/E numbers.
fn find_companion_video(season_dir: &Path, season: u32, episode: u32) -> Result<Option<String>> {
    for name in fs::list_dir(season_dir)? {
        if !fs::is_video_file(Path::new(&name)) {
            continue;
        }
        let (stem, _) = normalizer::split_extension(&name);
        if normalizer::extract_episode(stem) == Some((season, episode)) {
            tracing::debug!("Companion video for S{}E{}: {}", pad2(season), pad2(episode), name);
            return Ok(Some(stem.to_string()));
        }
    }
    Ok(None)
}
