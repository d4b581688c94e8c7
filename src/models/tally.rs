//! Run tally.

use crate::models::asset::Category;
use serde::{Deserialize, Serialize};

/// Per-category counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    pub movie: usize,
    pub show: usize,
    pub season: usize,
    pub episode: usize,
    pub collection: usize,
    pub failed: usize,
}

impl RunTally {
    /// Count a placed asset.
    pub fn record_placed(&mut self, category: Category) {
        match category {
            Category::Movie => self.movie += 1,
            Category::Show => self.show += 1,
            Category::Season => self.season += 1,
            Category::Episode => self.episode += 1,
            Category::Collection => self.collection += 1,
            // Anything else never reaches a library folder.
            Category::Skip | Category::NotSupported | Category::Unmatched => self.failed += 1,
        }
    }

    /// Count a file routed to the failed directory.
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// Total assets placed.
    pub fn placed(&self) -> usize {
        self.movie + self.show + self.season + self.episode + self.collection
    }

    /// Total files handled.
    pub fn total(&self) -> usize {
        self.placed() + self.failed
    }
}
