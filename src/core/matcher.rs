//! Library matcher.
//!
//! Resolves a parsed title (and optional year) to one folder of a frozen
//! library listing. Tiers are tried in order and the first hit wins:
//!
//! 1. **Exact**: same title, same year, no region tag.
//! 2. **Preferred**: a `(US)`/`(USA)` candidate whose year does not contradict the query.
//! 3. **Closest year**: smallest absolute year difference, first in listing order on ties.
//! 4. **Sole**: the candidate set has exactly one member.
//! 5. **Partial**: substring match anywhere in the listing, region-free folders first.
//!
//! The candidate set for tiers 2-4 is the set of folders whose title relates to
//! the query according to [`MatchMode`], narrowed to exact title matches when
//! there are any.
//!
//! A region group in the query, as in `The Office (UK)`, is split off the title.
//! Tiers 1-4 then only consider folders tagged with that region, and tier 5
//! matches against the full name including the tag.

use crate::core::library::{split_region, LibraryEntry, LibraryListing};
use crate::core::normalizer::{comparable, strip_collection_suffix, word_set};
use serde::{Deserialize, Serialize};

/// How a folder title must relate to the query title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The query appears inside the folder title (movie and show artwork).
    Contains,
    /// The folder title is a leading part of the query (season and episode artwork).
    Prefix,
}

/// Which tier of the cascade produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Preferred,
    ClosestYear,
    Sole,
    Partial,
    LowConfidence,
}

impl MatchTier {
    /// Tiers 1-4 are considered strong evidence.
    pub fn is_strong(self) -> bool {
        self <= MatchTier::Sole
    }
}

/// A resolved library folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryMatch<'a> {
    pub entry: &'a LibraryEntry,
    pub tier: MatchTier,
    /// The folder title equals the query title.
    pub title_equal: bool,
}

impl LibraryMatch<'_> {
    /// Strong tier on the very same title.
    pub fn is_confident(&self) -> bool {
        self.tier.is_strong() && self.title_equal
    }
}

/// Find the best folder for `title`/`year` in `listing`.
pub fn find_best_match<'a>(
    title: &str,
    year: Option<u16>,
    listing: &'a LibraryListing,
    mode: MatchMode,
) -> Option<LibraryMatch<'a>> {
    let (bare_title, region) = split_region(title);
    let query = comparable(&bare_title);
    if query.is_empty() {
        return None;
    }

    let hit = |entry: &'a LibraryEntry, tier: MatchTier| {
        tracing::debug!("Matched '{}' -> '{}' ({:?})", title, entry.name, tier);
        Some(LibraryMatch {
            entry,
            tier,
            title_equal: entry.comparable_title() == query,
        })
    };

    // Tier 1: exact title and year, same region tag (usually none).
    if let Some(entry) = listing
        .entries
        .iter()
        .find(|e| e.region == region && e.year == year && e.comparable_title() == query)
    {
        return hit(entry, MatchTier::Exact);
    }

    let related: Vec<&LibraryEntry> = listing
        .entries
        .iter()
        .filter(|e| region.is_none() || e.region == region)
        .filter(|e| relates(&query, &e.comparable_title(), mode))
        .collect();
    let same_title: Vec<&LibraryEntry> = related
        .iter()
        .copied()
        .filter(|e| e.comparable_title() == query)
        .collect();
    let candidates = if same_title.is_empty() { related } else { same_title };

    // Tier 2: preferred region.
    if let Some(entry) = candidates
        .iter()
        .copied()
        .filter(|e| e.is_us())
        .find(|e| year_compatible(e.year, year))
    {
        return hit(entry, MatchTier::Preferred);
    }

    // Tier 3: closest year.
    if let Some(query_year) = year {
        let closest = candidates
            .iter()
            .copied()
            .filter_map(|e| e.year.map(|y| (e, (i32::from(y) - i32::from(query_year)).abs())))
            .fold(None::<(&LibraryEntry, i32)>, |best, (e, diff)| match best {
                Some((_, best_diff)) if best_diff <= diff => best,
                _ => Some((e, diff)),
            });
        if let Some((entry, _)) = closest {
            return hit(entry, MatchTier::ClosestYear);
        }
    }

    // Tier 4: only one candidate.
    if let [entry] = candidates.as_slice() {
        return hit(*entry, MatchTier::Sole);
    }

    // Tier 5: any substring match, region-free (or requested region) folders first.
    let full_query = comparable(title);
    let partial: Vec<&LibraryEntry> = listing
        .entries
        .iter()
        .filter(|e| comparable(&e.name).contains(&full_query))
        .collect();
    if let Some(entry) = partial
        .iter()
        .copied()
        .find(|e| !e.is_foreign() || (region.is_some() && e.region == region))
    {
        return hit(entry, MatchTier::Partial);
    }
    if let Some(entry) = partial.first().copied() {
        tracing::warn!(
            " - Low confidence match: '{}' -> '{}'",
            title,
            entry.name
        );
        return hit(entry, MatchTier::LowConfidence);
    }

    None
}

/// Find a collection folder for `name`.
///
/// Both sides lose the word "collection"; the remaining words must be the same
/// set regardless of order. `Marvel Collection` finds `Marvel` and
/// `Marvel Collection` alike.
pub fn find_collection<'a>(name: &str, listing: &'a LibraryListing) -> Option<&'a LibraryEntry> {
    let wanted = word_set(&strip_collection_suffix(name));
    if wanted.is_empty() {
        return None;
    }

    listing
        .entries
        .iter()
        .find(|e| word_set(&strip_collection_suffix(&e.name)) == wanted)
}

/// Word-bounded relation between query and folder title.
fn relates(query: &str, folder_title: &str, mode: MatchMode) -> bool {
    if folder_title.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Contains => format!(" {} ", folder_title).contains(&format!(" {} ", query)),
        MatchMode::Prefix => {
            query == folder_title || query.starts_with(&format!("{} ", folder_title))
        }
    }
}

fn year_compatible(folder_year: Option<u16>, query_year: Option<u16>) -> bool {
    match (folder_year, query_year) {
        (Some(f), Some(q)) => f == q,
        _ => true,
    }
}
