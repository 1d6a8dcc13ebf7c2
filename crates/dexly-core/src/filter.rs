// ── List enhancement and filtering ──
//
// Pure, order-preserving transforms over the full item list. None of
// these can fail.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::convert::item_id_from_url;
use crate::model::{EnhancedItem, ItemId, ItemSummary};

/// Attach the id derived from each summary's resource URL.
pub fn enhance(summaries: &[ItemSummary]) -> Vec<EnhancedItem> {
    summaries
        .iter()
        .map(|s| EnhancedItem {
            id: item_id_from_url(&s.source_url),
            name: s.name.clone(),
            source_url: s.source_url.clone(),
        })
        .collect()
}

fn name_matches(name: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || name.to_lowercase().contains(needle_lower)
}

/// Case-insensitive substring match on `name`. An empty term keeps everything.
pub fn filter_by_name(items: &[EnhancedItem], term: &str) -> Vec<EnhancedItem> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| name_matches(&item.name, &needle))
        .cloned()
        .collect()
}

/// Keep items whose id is in `favorites`.
pub fn filter_by_favorites(
    items: &[EnhancedItem],
    favorites: &BTreeSet<ItemId>,
) -> Vec<EnhancedItem> {
    items
        .iter()
        .filter(|item| favorites.contains(&item.id))
        .cloned()
        .collect()
}

/// Search term and favorites toggle applied together, as the grid does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub search: String,
    pub favorites_only: bool,
}

impl ItemFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            favorites_only: false,
        }
    }

    pub fn favorites_only(mut self, on: bool) -> Self {
        self.favorites_only = on;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && !self.favorites_only
    }

    pub fn matches(&self, item: &EnhancedItem, favorites: &BTreeSet<ItemId>) -> bool {
        (!self.favorites_only || favorites.contains(&item.id))
            && name_matches(&item.name, &self.search.to_lowercase())
    }

    /// Filter in one pass; equivalent to `filter_by_favorites` after
    /// `filter_by_name`.
    pub fn apply(&self, items: &[EnhancedItem], favorites: &BTreeSet<ItemId>) -> Vec<EnhancedItem> {
        let needle = self.search.to_lowercase();
        items
            .iter()
            .filter(|item| {
                (!self.favorites_only || favorites.contains(&item.id))
                    && name_matches(&item.name, &needle)
            })
            .cloned()
            .collect()
    }
}
